use std::str::FromStr;

/// Politique de parsing permissive héritée du formulaire d'origine: le prix
/// et le stock arrivent en texte libre et retombent silencieusement sur la
/// valeur par défaut (0) quand le parsing échoue. C'est un choix assumé et
/// nommé, pas une coercion implicite: les tests l'exercent explicitement.
pub fn parse_or_default<T: FromStr + Default>(input: &str) -> T {
    input.trim().parse().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_valid_inputs_parse() {
        assert_eq!(parse_or_default::<i32>("42"), 42);
        assert_eq!(parse_or_default::<i32>("  7 "), 7);
        assert_eq!(parse_or_default::<Decimal>("15.50"), Decimal::new(1550, 2));
    }

    #[test]
    fn test_garbage_falls_back_to_zero() {
        assert_eq!(parse_or_default::<i32>("abc"), 0);
        assert_eq!(parse_or_default::<i32>(""), 0);
        assert_eq!(parse_or_default::<Decimal>("douze"), Decimal::ZERO);
    }

    #[test]
    fn test_negative_values_still_parse() {
        // Le clamp à zéro est la responsabilité du service catalogue
        assert_eq!(parse_or_default::<i32>("-3"), -3);
    }
}
