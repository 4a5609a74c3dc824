/// Mobile number as edited: country code digits plus a 10-digit national number.
/// Flat form: `"+91-827-4925-985"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Phone {
    pub country_code: String,
    pub number: String,
}

pub fn format_phone(phone: &Phone) -> String {
    let number = &phone.number;
    let grouped = if number.len() == 10 && number.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}-{}-{}", &number[..3], &number[3..7], &number[7..])
    } else {
        number.clone()
    };
    match phone.country_code.as_str() {
        "" => grouped,
        cc => format!("+{cc}-{grouped}"),
    }
}

/// Never fails. Numbers stored without a country code (or with spaces)
/// keep whatever digits can be recovered.
pub fn parse_phone(flat: &str) -> Phone {
    let flat = flat.trim();
    let has_plus = flat.starts_with('+');
    let body = flat.trim_start_matches('+');

    let mut groups = body.split(|c: char| c == '-' || c == ' ').filter(|g| !g.is_empty());

    if has_plus {
        if let Some(cc) = groups.next() {
            if (1..=3).contains(&cc.len()) && cc.bytes().all(|b| b.is_ascii_digit()) {
                return Phone {
                    country_code: cc.to_string(),
                    number: digits(groups),
                };
            }
        }
    }

    Phone {
        country_code: String::new(),
        number: body.chars().filter(char::is_ascii_digit).collect(),
    }
}

fn digits<'a>(groups: impl Iterator<Item = &'a str>) -> String {
    groups
        .flat_map(|g| g.chars())
        .filter(char::is_ascii_digit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone(cc: &str, number: &str) -> Phone {
        Phone {
            country_code: cc.to_string(),
            number: number.to_string(),
        }
    }

    #[test]
    fn test_format() {
        assert_eq!(format_phone(&phone("91", "8274925985")), "+91-827-4925-985");
        assert_eq!(format_phone(&phone("1", "4155550123")), "+1-415-5550-123");
    }

    #[test]
    fn test_round_trip() {
        for p in [
            phone("91", "8274925985"),
            phone("1", "4155550123"),
            phone("971", "5012345678"),
        ] {
            assert_eq!(parse_phone(&format_phone(&p)), p);
        }
    }

    #[test]
    fn test_parse_without_country_code() {
        assert_eq!(parse_phone("9876543210"), phone("", "9876543210"));
        assert_eq!(parse_phone("98765 43210"), phone("", "9876543210"));
    }

    #[test]
    fn test_parse_spaced_international() {
        assert_eq!(parse_phone("+44 7911 123456"), phone("44", "7911123456"));
    }

    #[test]
    fn test_parse_garbage_is_empty() {
        assert_eq!(parse_phone("call me"), Phone::default());
        assert_eq!(parse_phone(""), Phone::default());
    }
}
