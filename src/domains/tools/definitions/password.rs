//! Password generator tool definition.

use tracing::{info, instrument};

use crate::domains::tools::error::ToolError;
use crate::domains::tools::handlers::{InvocationResult, ToolDescriptor};
use crate::domains::tools::schema::{ParamValue, ParameterSpec, ToolArguments};

pub const MIN_LENGTH: i64 = 8;
pub const MAX_LENGTH: i64 = 50;
pub const DEFAULT_LENGTH: i64 = 12;

const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()-_=+[]{}|;:,.<>?";

/// How hard a generated password is to guess, roughly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Strength {
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl Strength {
    /// Rate a password by its length and the character classes it draws from.
    pub fn assess(length: usize, include_numbers: bool, include_symbols: bool) -> Self {
        let classes = 1 + usize::from(include_numbers) + usize::from(include_symbols);
        match (length, classes) {
            (16.., 3) => Self::VeryStrong,
            (12.., 2..) => Self::Strong,
            (10.., _) => Self::Moderate,
            _ => Self::Weak,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Weak => "Weak",
            Self::Moderate => "Moderate",
            Self::Strong => "Strong",
            Self::VeryStrong => "Very strong",
        }
    }
}

/// A generated password with its description.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPassword {
    pub password: String,
    pub include_numbers: bool,
    pub include_symbols: bool,
    pub strength: Strength,
}

impl GeneratedPassword {
    /// Render the password and a human-readable strength summary.
    pub fn render(&self) -> String {
        let mut classes = vec!["letters"];
        if self.include_numbers {
            classes.push("numbers");
        }
        if self.include_symbols {
            classes.push("symbols");
        }
        format!(
            "Generated password: {}\n\nLength: {} characters\nIncludes: {}\nStrength: {}",
            self.password,
            self.password.chars().count(),
            classes.join(", "),
            self.strength.label()
        )
    }
}

/// Password generator tool.
pub struct GeneratePasswordTool;

impl GeneratePasswordTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "generate_password";

    /// Human-readable title.
    pub const TITLE: &'static str = "Generate a password";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Generate a random password of 8 to 50 characters with optional numbers and symbols.";

    /// Declared parameters.
    pub fn parameters() -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::optional(
                "length",
                ParamValue::Integer(DEFAULT_LENGTH),
                "Password length (8-50)",
            ),
            ParameterSpec::optional(
                "include_symbols",
                ParamValue::Boolean(true),
                "Include symbols such as !@#$%",
            ),
            ParameterSpec::optional(
                "include_numbers",
                ParamValue::Boolean(true),
                "Include digits 0-9",
            ),
        ]
    }

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub fn execute(args: &ToolArguments) -> InvocationResult {
        let length = args.integer("length")?;
        let include_symbols = args.boolean("include_symbols")?;
        let include_numbers = args.boolean("include_numbers")?;
        info!("Password tool called (length {})", length);

        let mut rng = fastrand::Rng::new();
        generate_password(length, include_symbols, include_numbers, &mut rng).map(|p| p.render())
    }

    /// Build the registry descriptor for this tool.
    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            Self::NAME,
            Self::TITLE,
            Self::DESCRIPTION,
            Self::parameters(),
            Self::execute,
        )
    }
}

/// Build the character pool: letters always, digits and symbols on request.
pub fn character_pool(include_symbols: bool, include_numbers: bool) -> Vec<char> {
    let mut pool: Vec<char> = LETTERS.chars().collect();
    if include_numbers {
        pool.extend(DIGITS.chars());
    }
    if include_symbols {
        pool.extend(SYMBOLS.chars());
    }
    pool
}

/// Draw `length` characters uniformly (with replacement) from the pool.
///
/// # Errors
///
/// Returns a validation error unless `8 <= length <= 50`.
pub fn generate_password(
    length: i64,
    include_symbols: bool,
    include_numbers: bool,
    rng: &mut fastrand::Rng,
) -> Result<GeneratedPassword, ToolError> {
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
        return Err(ToolError::validation(format!(
            "Password length must be between {MIN_LENGTH} and {MAX_LENGTH} characters (got {length})"
        )));
    }

    let pool = character_pool(include_symbols, include_numbers);
    let password: String = (0..length)
        .map(|_| pool[rng.usize(..pool.len())])
        .collect();

    Ok(GeneratedPassword {
        strength: Strength::assess(password.len(), include_numbers, include_symbols),
        password,
        include_numbers,
        include_symbols,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_bounds() {
        let mut rng = fastrand::Rng::with_seed(42);
        assert!(matches!(
            generate_password(7, true, true, &mut rng),
            Err(ToolError::Validation(_))
        ));
        assert!(matches!(
            generate_password(51, true, true, &mut rng),
            Err(ToolError::Validation(_))
        ));
        assert_eq!(
            generate_password(8, true, true, &mut rng).unwrap().password.len(),
            8
        );
        assert_eq!(
            generate_password(50, true, true, &mut rng).unwrap().password.len(),
            50
        );
    }

    #[test]
    fn test_repeated_generation_respects_constraints() {
        let mut rng = fastrand::Rng::with_seed(9);
        let pool = character_pool(true, true);
        for _ in 0..100 {
            let generated = generate_password(12, true, true, &mut rng).unwrap();
            assert_eq!(generated.password.chars().count(), 12);
            assert!(generated.password.chars().all(|c| pool.contains(&c)));
        }
    }

    #[test]
    fn test_letters_only_pool() {
        let mut rng = fastrand::Rng::with_seed(5);
        let generated = generate_password(40, false, false, &mut rng).unwrap();
        assert!(generated.password.chars().all(|c| c.is_ascii_alphabetic()));
        assert_eq!(character_pool(false, false).len(), 52);
        assert_eq!(character_pool(true, true).len(), 52 + 10 + SYMBOLS.len());
    }

    #[test]
    fn test_strength_assessment() {
        assert_eq!(Strength::assess(8, false, false), Strength::Weak);
        assert_eq!(Strength::assess(10, false, false), Strength::Moderate);
        assert_eq!(Strength::assess(12, true, false), Strength::Strong);
        assert_eq!(Strength::assess(16, true, true), Strength::VeryStrong);
    }

    #[test]
    fn test_render() {
        let generated = GeneratedPassword {
            password: "abcdEFGH12!?".to_string(),
            include_numbers: true,
            include_symbols: true,
            strength: Strength::Strong,
        };
        let text = generated.render();
        assert!(text.starts_with("Generated password: abcdEFGH12!?"));
        assert!(text.contains("Length: 12 characters"));
        assert!(text.contains("Includes: letters, numbers, symbols"));
        assert!(text.contains("Strength: Strong"));
    }
}
