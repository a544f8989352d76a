//! Payload templating for WiFi network and contact card QR codes.

use std::fmt;

/// A `WIFI:` network join record.
///
/// Renders to the de-facto `WIFI:T:<security>;S:<ssid>;P:<password>;;`
/// format, escaping the characters that delimit the record.
#[derive(Debug, Clone, Default)]
pub struct WifiNetwork {
    pub ssid: String,
    pub password: String,
    /// `WPA`, `WEP` or `nopass`.
    pub security: String,
    pub hidden: bool,
}

impl fmt::Display for WifiNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hidden = if self.hidden { "H:true;" } else { "" };
        // The record ends with a double semicolon unless H: terminates it.
        let suffix = if self.hidden { "" } else { ";" };
        write!(
            f,
            "WIFI:T:{};S:{};P:{};{}{}",
            self.security,
            escape_wifi(&self.ssid),
            escape_wifi(&self.password),
            hidden,
            suffix
        )
    }
}

fn escape_wifi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | ';' | ',' | '"') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// A vCard 3.0 contact record. Empty fields are omitted from the output.
#[derive(Debug, Clone, Default)]
pub struct VCard {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub org: String,
    pub title: String,
    pub url: String,
    pub address: String,
}

impl fmt::Display for VCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BEGIN:VCARD")?;
        writeln!(f, "VERSION:3.0")?;

        if !self.name.is_empty() {
            writeln!(f, "FN:{}", self.name)?;
            // N: wants "family;given"; split a single space-separated name.
            match self.name.split_once(' ') {
                Some((given, family)) => writeln!(f, "N:{family};{given};;;")?,
                None => writeln!(f, "N:{};;;;", self.name)?,
            }
        }
        if !self.phone.is_empty() {
            writeln!(f, "TEL:{}", self.phone)?;
        }
        if !self.email.is_empty() {
            writeln!(f, "EMAIL:{}", self.email)?;
        }
        if !self.org.is_empty() {
            writeln!(f, "ORG:{}", self.org)?;
        }
        if !self.title.is_empty() {
            writeln!(f, "TITLE:{}", self.title)?;
        }
        if !self.url.is_empty() {
            writeln!(f, "URL:{}", self.url)?;
        }
        if !self.address.is_empty() {
            writeln!(f, "ADR:;;{};;;;", self.address)?;
        }

        write!(f, "END:VCARD")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wifi_record() {
        let cases = [
            (
                WifiNetwork {
                    ssid: "MyNetwork".into(),
                    password: "secret123".into(),
                    security: "WPA".into(),
                    hidden: false,
                },
                "WIFI:T:WPA;S:MyNetwork;P:secret123;;",
            ),
            (
                WifiNetwork {
                    ssid: "Open;Network".into(),
                    password: String::new(),
                    security: "nopass".into(),
                    hidden: false,
                },
                "WIFI:T:nopass;S:Open\\;Network;P:;;",
            ),
            (
                WifiNetwork {
                    ssid: "Hidden".into(),
                    password: "pass".into(),
                    security: "WPA".into(),
                    hidden: true,
                },
                "WIFI:T:WPA;S:Hidden;P:pass;H:true;",
            ),
        ];

        for (network, want) in cases {
            assert_eq!(network.to_string(), want);
        }
    }

    #[test]
    fn test_wifi_escapes_specials() {
        let network = WifiNetwork {
            ssid: r#"a\b,c"d"#.into(),
            password: String::new(),
            security: "WEP".into(),
            hidden: false,
        };
        assert_eq!(network.to_string(), "WIFI:T:WEP;S:a\\\\b\\,c\\\"d;P:;;");
    }

    #[test]
    fn test_vcard_fields() {
        let card = VCard {
            name: "John Doe".into(),
            phone: "+1234567890".into(),
            email: "john@example.com".into(),
            ..VCard::default()
        };
        let out = card.to_string();
        assert!(out.starts_with("BEGIN:VCARD\nVERSION:3.0\n"));
        assert!(out.contains("FN:John Doe\n"));
        assert!(out.contains("N:Doe;John;;;\n"));
        assert!(out.contains("TEL:+1234567890\n"));
        assert!(out.contains("EMAIL:john@example.com\n"));
        assert!(!out.contains("ORG:"));
        assert!(out.ends_with("END:VCARD"));
    }

    #[test]
    fn test_vcard_single_word_name() {
        let card = VCard { name: "Cher".into(), ..VCard::default() };
        assert!(card.to_string().contains("N:Cher;;;;\n"));
    }
}
