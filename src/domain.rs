use url::{Host, Url};

const DEFAULT_SCHEME: &str = "http://";

/// Normaliza una línea de entrada (URL o host) a un nombre resoluble.
///
/// Si la línea no trae esquema se antepone `http://`, de modo que `host`,
/// `host:puerto` y una URL completa se analizan igual. Si el análisis falla
/// se devuelve la línea recortada sin cambios.
pub fn extract_domain(input: &str) -> String {
    let input = input.trim();

    let parsed = if has_scheme(input) {
        Url::parse(input)
    } else {
        Url::parse(&format!("{DEFAULT_SCHEME}{input}"))
    };

    let host = match parsed.ok().and_then(|url| url.host().map(|host| host.to_owned())) {
        Some(Host::Domain(domain)) => domain,
        Some(Host::Ipv4(ip)) => ip.to_string(),
        // sin corchetes, igual que un literal
        Some(Host::Ipv6(ip)) => ip.to_string(),
        None => return input.to_string(),
    };

    if let Some(rest) = host.strip_prefix("www.") {
        return rest.to_string();
    }
    host
}

/// `true` si la línea empieza con `esquema://`. Un `://` dentro de la ruta o
/// de la query no cuenta.
fn has_scheme(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once("://") else {
        return false;
    };

    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_and_url_forms_agree() {
        for input in [
            "example.com",
            "http://example.com",
            "https://www.example.com",
            "www.example.com",
            "https://example.com/path?q=1#frag",
            "example.com:8080",
            "  http://www.example.com:443/index.html  ",
        ] {
            assert_eq!(extract_domain(input), "example.com", "input: {input}");
        }
    }

    #[test]
    fn scheme_inside_query_is_not_a_prefix() {
        assert_eq!(
            extract_domain("example.com/login?next=https://other.org/"),
            "example.com"
        );
        assert_eq!(
            extract_domain("www.example.com/r#https://other.org"),
            "example.com"
        );
        assert_eq!(
            extract_domain("https://example.com/?u=http://other.org"),
            "example.com"
        );
    }

    #[test]
    fn scheme_detection() {
        assert!(has_scheme("http://example.com"));
        assert!(has_scheme("svn+ssh://example.com"));
        assert!(!has_scheme("example.com"));
        assert!(!has_scheme("example.com/a?b=http://c"));
        assert!(!has_scheme("://example.com"));
        assert!(!has_scheme("1http://example.com"));
    }

    #[test]
    fn idempotent_on_bare_hosts() {
        let once = extract_domain("https://www.sub.example.org/a");
        assert_eq!(once, "sub.example.org");
        assert_eq!(extract_domain(&once), once);
    }

    #[test]
    fn only_leading_www_is_stripped() {
        assert_eq!(extract_domain("www.www.example.com"), "www.example.com");
        assert_eq!(extract_domain("api.www.example.com"), "api.www.example.com");
        assert_eq!(extract_domain("wwwexample.com"), "wwwexample.com");
    }

    #[test]
    fn host_is_lowercased() {
        assert_eq!(extract_domain("HTTPS://WWW.Example.COM"), "example.com");
    }

    #[test]
    fn ip_literals() {
        assert_eq!(extract_domain("http://93.184.216.34:80/"), "93.184.216.34");
        assert_eq!(extract_domain("http://[::1]:8080/"), "::1");
    }

    #[test]
    fn unparsable_input_falls_back_to_trimmed_line() {
        assert_eq!(extract_domain(""), "");
        assert_eq!(extract_domain("   "), "");
        assert_eq!(extract_domain("exa mple.com "), "exa mple.com");
        assert_eq!(extract_domain("host:notaport"), "host:notaport");
    }
}
