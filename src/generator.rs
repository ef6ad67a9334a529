// src/generator.rs
use rand::rngs::OsRng; // OS-backed CSPRNG
use rand::Rng;

const LETTER_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const NUMBER_CHARS: &[u8] = b"0123456789";
const SYMBOL_CHARS: &[u8] = b"!@#$%^&*";

pub const MIN_LENGTH: usize = 4;
pub const MAX_LENGTH: usize = 50;

#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    pub length: usize,
    pub include_symbols: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            length: 12,
            include_symbols: true,
        }
    }
}

/// Generates a password of `options.length` characters, clamped into
/// [`MIN_LENGTH`, `MAX_LENGTH`]. The pool is ASCII letters and digits, plus
/// the `!@#$%^&*` symbols when requested. Each character is an independent
/// draw from the operating system's random source, so repeats are possible.
pub fn generate_password(options: &GeneratorOptions) -> String {
    let length = options.length.clamp(MIN_LENGTH, MAX_LENGTH);

    let mut charset = Vec::with_capacity(LETTER_CHARS.len() + NUMBER_CHARS.len() + SYMBOL_CHARS.len());
    charset.extend_from_slice(LETTER_CHARS);
    charset.extend_from_slice(NUMBER_CHARS);
    if options.include_symbols {
        charset.extend_from_slice(SYMBOL_CHARS);
    }

    let mut rng = OsRng;
    (0..length)
        .map(|_| charset[rng.gen_range(0..charset.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_password_default_options() {
        let options = GeneratorOptions::default();
        let password = generate_password(&options);
        assert_eq!(password.len(), 12);
        println!("Generated password (default): {}", password);
    }

    #[test]
    fn test_generate_password_custom_length() {
        let options = GeneratorOptions {
            length: 32,
            ..Default::default()
        };
        assert_eq!(generate_password(&options).len(), 32);
    }

    #[test]
    fn test_generate_password_clamps_short_requests() {
        let options = GeneratorOptions {
            length: 1,
            ..Default::default()
        };
        assert_eq!(generate_password(&options).len(), MIN_LENGTH);
    }

    #[test]
    fn test_generate_password_clamps_long_requests() {
        let options = GeneratorOptions {
            length: 500,
            ..Default::default()
        };
        assert_eq!(generate_password(&options).len(), MAX_LENGTH);
    }

    #[test]
    fn test_generate_password_without_symbols_is_alphanumeric() {
        let options = GeneratorOptions {
            length: 4,
            include_symbols: false,
        };
        let password = generate_password(&options);
        assert_eq!(password.len(), 4);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_password_stays_within_the_pool() {
        let options = GeneratorOptions {
            length: 50,
            include_symbols: true,
        };
        let password = generate_password(&options);
        assert!(password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || SYMBOL_CHARS.contains(&(c as u8))));
    }

    #[test]
    fn test_generate_password_randomness() {
        let options = GeneratorOptions {
            length: 20,
            include_symbols: true,
        };
        let password_1 = generate_password(&options);
        let password_2 = generate_password(&options);
        assert_ne!(
            password_1, password_2,
            "Passwords generated with the same options should generally differ."
        );
        println!("Generated passwords for randomness test: {} and {}", password_1, password_2);
    }
}
