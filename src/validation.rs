//! Password strength and confirmation-match checks shared by the auth and
//! reset pages.
//!
//! Each strength rule is an independent regex over the candidate password;
//! no rule depends on another. The match check compares the password and its
//! confirmation and distinguishes a blank confirmation from a mismatch so the
//! UI can stay quiet until the user has typed something.

use std::sync::LazyLock;

use regex::Regex;

/// One rule of the password-strength checklist.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrengthRule {
    /// At least one lowercase letter.
    Lowercase,
    /// At least one uppercase letter.
    Uppercase,
    /// At least one digit.
    Digit,
    /// At least one special character from the accepted set.
    Special,
    /// At least eight characters.
    MinLength,
}

impl StrengthRule {
    /// All rules, in checklist display order.
    pub const ALL: [StrengthRule; 5] = [
        StrengthRule::Lowercase,
        StrengthRule::Uppercase,
        StrengthRule::Digit,
        StrengthRule::Special,
        StrengthRule::MinLength,
    ];

    /// Checklist label shown next to the rule's valid marker.
    pub fn label(self) -> &'static str {
        match self {
            StrengthRule::Lowercase => "One lowercase letter",
            StrengthRule::Uppercase => "One uppercase letter",
            StrengthRule::Digit => "One number",
            StrengthRule::Special => "One special character (@$!%*?&_#)",
            StrengthRule::MinLength => "At least 8 characters",
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            StrengthRule::Lowercase => "[a-z]",
            StrengthRule::Uppercase => "[A-Z]",
            StrengthRule::Digit => "[0-9]",
            StrengthRule::Special => "[@$!%*?&_#]",
            StrengthRule::MinLength => ".{8,}",
        }
    }

    /// Whether `value` satisfies this rule.
    pub fn check(self, value: &str) -> bool {
        static REGEXES: LazyLock<[Regex; 5]> = LazyLock::new(|| {
            StrengthRule::ALL.map(|rule| {
                Regex::new(rule.pattern()).expect("strength rule regex must compile")
            })
        });
        let index = StrengthRule::ALL
            .iter()
            .position(|candidate| *candidate == self)
            .expect("rule present in ALL");
        REGEXES[index].is_match(value)
    }
}

/// Result of evaluating all five strength rules against one password.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StrengthReport {
    pub lowercase: bool,
    pub uppercase: bool,
    pub digit: bool,
    pub special: bool,
    pub min_length: bool,
}

impl StrengthReport {
    /// Evaluate every rule against `value`.
    pub fn evaluate(value: &str) -> Self {
        Self {
            lowercase: StrengthRule::Lowercase.check(value),
            uppercase: StrengthRule::Uppercase.check(value),
            digit: StrengthRule::Digit.check(value),
            special: StrengthRule::Special.check(value),
            min_length: StrengthRule::MinLength.check(value),
        }
    }

    /// Whether `rule` passed in this report.
    pub fn passed(&self, rule: StrengthRule) -> bool {
        match rule {
            StrengthRule::Lowercase => self.lowercase,
            StrengthRule::Uppercase => self.uppercase,
            StrengthRule::Digit => self.digit,
            StrengthRule::Special => self.special,
            StrengthRule::MinLength => self.min_length,
        }
    }

    /// Whether every rule passed.
    pub fn all_passed(&self) -> bool {
        StrengthRule::ALL.iter().all(|rule| self.passed(*rule))
    }
}

/// Live comparison of the password and confirmation fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchState {
    /// Confirmation field is blank; show nothing.
    #[default]
    Empty,
    /// Both fields hold the same value.
    Match,
    /// Fields differ.
    Mismatch,
}

impl MatchState {
    /// Indicator text for this state, or `None` when nothing should show.
    pub fn message(self) -> Option<&'static str> {
        match self {
            MatchState::Empty => None,
            MatchState::Match => Some(MATCH_MESSAGE),
            MatchState::Mismatch => Some(MISMATCH_MESSAGE),
        }
    }
}

/// Positive match indicator text.
pub const MATCH_MESSAGE: &str = "Passwords match";
/// Negative match indicator text, also used by the register submit guard.
pub const MISMATCH_MESSAGE: &str = "Passwords do not match";

/// Compare the password and confirmation values.
///
/// Blank confirmation yields [`MatchState::Empty`] regardless of the
/// password, so the indicator stays hidden until the user types.
pub fn validate_match(password: &str, confirm: &str) -> MatchState {
    if confirm.is_empty() {
        return MatchState::Empty;
    }
    if password == confirm {
        MatchState::Match
    } else {
        MatchState::Mismatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_are_independent_of_each_other() {
        // Each sample satisfies exactly one rule.
        let samples = [
            (StrengthRule::Lowercase, "a"),
            (StrengthRule::Uppercase, "A"),
            (StrengthRule::Digit, "5"),
            (StrengthRule::Special, "@"),
            (StrengthRule::MinLength, "--------"),
        ];
        for (rule, value) in samples {
            assert!(rule.check(value), "{rule:?} should accept {value:?}");
            for other in StrengthRule::ALL {
                if other == rule {
                    continue;
                }
                assert!(
                    !other.check(value),
                    "{other:?} should reject {value:?}"
                );
            }
        }
    }

    #[test]
    fn strong_password_passes_every_rule() {
        let report = StrengthReport::evaluate("A1@abcdef");
        assert!(report.all_passed());
    }

    #[test]
    fn report_tracks_individual_failures() {
        let report = StrengthReport::evaluate("abcdefgh");
        assert!(report.lowercase);
        assert!(report.min_length);
        assert!(!report.uppercase);
        assert!(!report.digit);
        assert!(!report.special);
        assert!(!report.all_passed());
    }

    #[test]
    fn empty_password_fails_every_rule() {
        let report = StrengthReport::evaluate("");
        for rule in StrengthRule::ALL {
            assert!(!report.passed(rule));
        }
    }

    #[test]
    fn match_states_cover_empty_match_and_mismatch() {
        assert_eq!(validate_match("", ""), MatchState::Empty);
        assert_eq!(validate_match("Abc12345", ""), MatchState::Empty);
        assert_eq!(validate_match("Abc12345", "Abc12345"), MatchState::Match);
        assert_eq!(validate_match("Abc12345", "Abc1234"), MatchState::Mismatch);
    }

    #[test]
    fn match_messages_follow_state() {
        assert_eq!(MatchState::Empty.message(), None);
        assert_eq!(MatchState::Match.message(), Some(MATCH_MESSAGE));
        assert_eq!(MatchState::Mismatch.message(), Some(MISMATCH_MESSAGE));
    }
}
