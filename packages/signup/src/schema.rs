//! # Declarative signup schema
//!
//! The schema is data: each field is a [`FieldSchema`] holding an ordered list
//! of independent [`Rule`]s plus a transform, and the tech list is a
//! [`ListSchema`] with list-level rules and one field schema per sub-field.
//! [`Schema::validate`] is the only driver. It evaluates every field of the
//! candidate and collects every failure into one [`FieldErrors`].
//!
//! ## Evaluation of one field
//!
//! Rules run in order. A failing *halting* rule (the presence checks) stops
//! the remaining rules of that field; other failures are all reported. The
//! transform runs only when the field produced no error, so normalization
//! never sees empty input.
//!
//! ## Rule table (default [`SchemaConfig`])
//!
//! | Path | Rule | Kind |
//! |------|------|------|
//! | `avatar` | first file smaller than 2 MiB | `SizeExceeded` |
//! | `name` | not blank | `Required` |
//! | `email` | not blank / email shaped / ends with `@neon.com.br` | `Required` / `InvalidFormat` / `DomainNotAllowed` |
//! | `password` | not empty / at least 10 chars | `Required` / `TooShort` |
//! | `techs` | at least one / at least two / unique names | `Required` / `MinCountNotMet` / `DuplicateEntries` |
//! | `techs.<i>.name` | not blank | `Required` |
//! | `techs.<i>.knowledge` | a [`Knowledge`] value | `InvalidEnum` |

use std::collections::HashSet;

use validator::ValidateEmail;

use crate::config::SchemaConfig;
use crate::error::{ErrorKind, FieldError, FieldErrors, FieldPath, TechField};
use crate::models::{CandidateInput, FileRef, Knowledge, Tech, TechInput, ValidatedRecord};

const AVATAR_TOO_LARGE: &str = "O avatar precisa ter no máximo";
const NAME_REQUIRED: &str = "O nome é obrigatório";
const EMAIL_REQUIRED: &str = "O e-mail é obrigatório";
const EMAIL_INVALID: &str = "e-mail inválido";
const PASSWORD_REQUIRED: &str = "A senha é obrigatória";
const TECHS_REQUIRED: &str = "Pelo menos uma tecnologia é obrigatória";
const TECHS_DUPLICATED: &str = "Tecnologias duplicadas";
const TECH_NAME_REQUIRED: &str = "O nome da tecnologia é obrigatório";
const TECH_KNOWLEDGE_INVALID: &str = "Nível de conhecimento inválido";

type Check<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;
type Transform<T, O> = Box<dyn Fn(&T) -> O + Send + Sync>;

/// A single predicate with the error it raises when the predicate is false.
pub struct Rule<T: ?Sized> {
    kind: ErrorKind,
    message: String,
    halts: bool,
    check: Check<T>,
}

impl<T: ?Sized> Rule<T> {
    pub fn new(
        kind: ErrorKind,
        message: impl Into<String>,
        check: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            halts: false,
            check: Box::new(check),
        }
    }

    /// A presence rule. When it fails, later rules of the field are skipped.
    pub fn required(
        message: impl Into<String>,
        check: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            halts: true,
            ..Self::new(ErrorKind::Required, message, check)
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the error if `value` breaks the rule.
    pub fn apply(&self, value: &T) -> Option<FieldError> {
        if (self.check)(value) {
            None
        } else {
            Some(FieldError::new(self.kind, self.message.clone()))
        }
    }
}

/// Rules and normalizing transform for one field.
pub struct FieldSchema<T: ?Sized, O> {
    rules: Vec<Rule<T>>,
    transform: Transform<T, O>,
}

impl<T: ?Sized, O> FieldSchema<T, O> {
    pub fn new(transform: impl Fn(&T) -> O + Send + Sync + 'static) -> Self {
        Self {
            rules: Vec::new(),
            transform: Box::new(transform),
        }
    }

    /// Builder method to append a rule.
    pub fn rule(mut self, rule: Rule<T>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[Rule<T>] {
        &self.rules
    }

    pub fn evaluate(&self, value: &T) -> Result<O, Vec<FieldError>> {
        let mut errors = Vec::new();
        for rule in &self.rules {
            if let Some(error) = rule.apply(value) {
                errors.push(error);
                if rule.halts {
                    break;
                }
            }
        }
        if errors.is_empty() {
            Ok((self.transform)(value))
        } else {
            Err(errors)
        }
    }
}

impl FieldSchema<str, String> {
    /// A text field that is kept as typed.
    pub fn text() -> Self {
        Self::new(|value: &str| value.to_string())
    }
}

/// Schema of the tech list: rules on the whole list and on each row.
pub struct ListSchema {
    rules: Vec<Rule<[TechInput]>>,
    name: FieldSchema<str, String>,
    knowledge: FieldSchema<str, Knowledge>,
}

impl ListSchema {
    /// Evaluates list rules, then every row. Errors land in `errors`;
    /// the rows are returned only if nothing in the list failed.
    pub fn evaluate(&self, techs: &[TechInput], errors: &mut FieldErrors) -> Option<Vec<Tech>> {
        let mut failed = false;
        for rule in &self.rules {
            if let Some(error) = rule.apply(techs) {
                failed = true;
                errors.push(FieldPath::Techs, error);
                if rule.halts {
                    return None;
                }
            }
        }

        let mut valid = Vec::with_capacity(techs.len());
        for (index, tech) in techs.iter().enumerate() {
            let name = self.name.evaluate(&tech.name);
            let knowledge = self.knowledge.evaluate(&tech.knowledge);
            match (name, knowledge) {
                (Ok(name), Ok(knowledge)) => valid.push(Tech { name, knowledge }),
                (name, knowledge) => {
                    failed = true;
                    if let Err(e) = name {
                        errors.extend(row_path(index, TechField::Name), e);
                    }
                    if let Err(e) = knowledge {
                        errors.extend(row_path(index, TechField::Knowledge), e);
                    }
                }
            }
        }

        if failed {
            None
        } else {
            Some(valid)
        }
    }
}

fn row_path(index: usize, field: TechField) -> FieldPath {
    FieldPath::Tech { index, field }
}

/// The complete signup schema.
pub struct Schema {
    avatar: FieldSchema<[FileRef], Option<FileRef>>,
    name: FieldSchema<str, String>,
    email: FieldSchema<str, String>,
    password: FieldSchema<str, String>,
    techs: ListSchema,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new(&SchemaConfig::default())
    }
}

impl Schema {
    /// Build the rule table for the given limits.
    pub fn new(config: &SchemaConfig) -> Self {
        let max_avatar = config.max_avatar_bytes;
        let avatar = FieldSchema::new(|files: &[FileRef]| files.first().cloned()).rule(Rule::new(
            ErrorKind::SizeExceeded,
            format!("{AVATAR_TOO_LARGE} {}", human_size(max_avatar)),
            move |files: &[FileRef]| files.first().map_or(true, |f| f.size < max_avatar),
        ));

        let name = FieldSchema::new(title_case)
            .rule(Rule::required(NAME_REQUIRED, not_blank));

        let domain = config.email_domain.clone();
        let email = FieldSchema::text()
            .rule(Rule::required(EMAIL_REQUIRED, not_blank))
            .rule(Rule::new(ErrorKind::InvalidFormat, EMAIL_INVALID, |value: &str| {
                value.to_owned().validate_email()
            }))
            .rule(Rule::new(
                ErrorKind::DomainNotAllowed,
                format!("email precisa ser {domain}"),
                move |value: &str| value.ends_with(domain.as_str()),
            ));

        let min_password = config.min_password_chars;
        let password = FieldSchema::text()
            .rule(Rule::required(PASSWORD_REQUIRED, |value: &str| !value.is_empty()))
            .rule(Rule::new(
                ErrorKind::TooShort,
                format!("A senha precisa de {min_password} caracteres"),
                move |value: &str| value.chars().count() >= min_password,
            ));

        let min_techs = config.min_techs;
        let techs = ListSchema {
            rules: vec![
                Rule::required(TECHS_REQUIRED, |techs: &[TechInput]| !techs.is_empty()),
                Rule::new(
                    ErrorKind::MinCountNotMet,
                    format!("Pelo menos {} tecnologias são obrigatórias", count_word(min_techs)),
                    move |techs: &[TechInput]| techs.len() >= min_techs,
                ),
                Rule::new(ErrorKind::DuplicateEntries, TECHS_DUPLICATED, unique_names),
            ],
            name: FieldSchema::text().rule(Rule::required(TECH_NAME_REQUIRED, not_blank)),
            knowledge: FieldSchema::new(|value: &str| {
                // guarded by the InvalidEnum rule
                Knowledge::from_value(value).unwrap_or_default()
            })
            .rule(Rule::new(
                ErrorKind::InvalidEnum,
                TECH_KNOWLEDGE_INVALID,
                |value: &str| Knowledge::from_value(value).is_some(),
            )),
        };

        Self {
            avatar,
            name,
            email,
            password,
            techs,
        }
    }

    /// Validate and normalize a candidate, collecting every field error.
    pub fn validate(&self, candidate: &CandidateInput) -> Result<ValidatedRecord, FieldErrors> {
        let mut errors = FieldErrors::new();

        let avatar = collect(&mut errors, FieldPath::Avatar, self.avatar.evaluate(&candidate.avatar));
        let name = collect(&mut errors, FieldPath::Name, self.name.evaluate(&candidate.name));
        let email = collect(&mut errors, FieldPath::Email, self.email.evaluate(&candidate.email));
        let password = collect(
            &mut errors,
            FieldPath::Password,
            self.password.evaluate(&candidate.password),
        );
        let techs = self.techs.evaluate(&candidate.techs, &mut errors);

        match (avatar, name, email, password, techs) {
            (Some(avatar), Some(name), Some(email), Some(password), Some(techs)) => {
                Ok(ValidatedRecord {
                    avatar,
                    name,
                    email,
                    password,
                    techs,
                })
            }
            _ => {
                tracing::debug!(fields = errors.len(), "signup candidate rejected");
                Err(errors)
            }
        }
    }
}

/// Validate against the default schema.
pub fn validate(candidate: &CandidateInput) -> Result<ValidatedRecord, FieldErrors> {
    Schema::default().validate(candidate)
}

fn collect<O>(
    errors: &mut FieldErrors,
    path: FieldPath,
    result: Result<O, Vec<FieldError>>,
) -> Option<O> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            errors.extend(path, e);
            None
        }
    }
}

fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Names compare trimmed and lowercased, blank names included.
fn unique_names(techs: &[TechInput]) -> bool {
    let names: Vec<String> = techs
        .iter()
        .map(|tech| tech.name.trim().to_lowercase())
        .collect();
    let unique: HashSet<&str> = names.iter().map(String::as_str).collect();
    unique.len() == names.len()
}

/// Collapse whitespace runs and uppercase the first character of each word.
///
/// `"  ana   maria  "` becomes `"Ana Maria"`.
pub fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn human_size(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if bytes % MIB == 0 {
        format!("{}mb", bytes / MIB)
    } else {
        format!("{bytes} bytes")
    }
}

fn count_word(n: usize) -> String {
    match n {
        1 => "uma".to_string(),
        2 => "duas".to_string(),
        3 => "três".to_string(),
        n => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tech(name: &str, knowledge: &str) -> TechInput {
        TechInput::new(name, knowledge)
    }

    fn valid_candidate() -> CandidateInput {
        CandidateInput {
            avatar: Vec::new(),
            name: "joão".to_string(),
            email: "joao@neon.com.br".to_string(),
            password: "1234567890".to_string(),
            techs: vec![tech("Go", "basico"), tech("Rust", "avançado")],
        }
    }

    fn kinds(errors: &FieldErrors, path: FieldPath) -> Vec<ErrorKind> {
        errors.get(path).iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_valid_candidate() {
        let record = validate(&valid_candidate()).unwrap();
        assert_eq!(record.name(), "João");
        assert_eq!(record.email(), "joao@neon.com.br");
        assert_eq!(record.password(), "1234567890");
        assert!(record.avatar().is_none());
        assert_eq!(record.techs().len(), 2);
        assert_eq!(record.techs()[0].name(), "Go");
        assert_eq!(record.techs()[0].knowledge(), Knowledge::Basic);
        assert_eq!(record.techs()[1].name(), "Rust");
        assert_eq!(record.techs()[1].knowledge(), Knowledge::Advanced);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("  ana   maria  "), "Ana Maria");
        assert_eq!(title_case("joão"), "João");
        assert_eq!(title_case("mcDonald o'neil"), "McDonald O'neil");
        assert_eq!(title_case("ana\tmaria\nsilva"), "Ana Maria Silva");
        assert_eq!(title_case("   "), "");
    }

    #[test]
    fn test_name_normalized_in_record() {
        let candidate = CandidateInput {
            name: "  ana   maria  ".to_string(),
            ..valid_candidate()
        };
        assert_eq!(validate(&candidate).unwrap().name(), "Ana Maria");
    }

    #[test]
    fn test_blank_name_is_required() {
        for name in ["", "   "] {
            let candidate = CandidateInput {
                name: name.to_string(),
                ..valid_candidate()
            };
            let errors = validate(&candidate).unwrap_err();
            assert_eq!(kinds(&errors, FieldPath::Name), vec![ErrorKind::Required]);
            assert_eq!(errors.first(FieldPath::Name).unwrap().message, NAME_REQUIRED);
        }
    }

    #[test]
    fn test_email_rules() {
        let schema = Schema::default();
        let check = |email: &str| {
            let candidate = CandidateInput {
                email: email.to_string(),
                ..valid_candidate()
            };
            schema.validate(&candidate).err()
        };

        assert!(check("user@neon.com.br").is_none());

        let errors = check("user@gmail.com").unwrap();
        assert_eq!(kinds(&errors, FieldPath::Email), vec![ErrorKind::DomainNotAllowed]);
        assert_eq!(
            errors.first(FieldPath::Email).unwrap().message,
            "email precisa ser @neon.com.br"
        );

        let errors = check("not-an-email").unwrap();
        assert!(errors.has(FieldPath::Email, ErrorKind::InvalidFormat));
        assert_eq!(errors.first(FieldPath::Email).unwrap().message, EMAIL_INVALID);

        let errors = check("").unwrap();
        assert_eq!(kinds(&errors, FieldPath::Email), vec![ErrorKind::Required]);
    }

    #[test]
    fn test_password_length() {
        let check = |password: &str| {
            let candidate = CandidateInput {
                password: password.to_string(),
                ..valid_candidate()
            };
            validate(&candidate)
        };

        let errors = check("123456789").unwrap_err();
        assert_eq!(kinds(&errors, FieldPath::Password), vec![ErrorKind::TooShort]);
        assert_eq!(
            errors.first(FieldPath::Password).unwrap().message,
            "A senha precisa de 10 caracteres"
        );

        assert!(check("1234567890").is_ok());
        // counted in characters, not bytes
        assert!(check("çççççççççç").is_ok());

        let errors = check("").unwrap_err();
        assert_eq!(kinds(&errors, FieldPath::Password), vec![ErrorKind::Required]);
    }

    #[test]
    fn test_tech_count() {
        let mut candidate = valid_candidate();

        candidate.techs.clear();
        let errors = validate(&candidate).unwrap_err();
        assert_eq!(kinds(&errors, FieldPath::Techs), vec![ErrorKind::Required]);

        candidate.techs = vec![tech("Go", "basico")];
        let errors = validate(&candidate).unwrap_err();
        assert_eq!(kinds(&errors, FieldPath::Techs), vec![ErrorKind::MinCountNotMet]);
        assert_eq!(
            errors.first(FieldPath::Techs).unwrap().message,
            "Pelo menos duas tecnologias são obrigatórias"
        );
    }

    #[test]
    fn test_duplicate_techs_ignore_case_and_whitespace() {
        let candidate = CandidateInput {
            techs: vec![
                tech("React", "basico"),
                tech(" react ", "intermediário"),
                tech("Go", "basico"),
            ],
            ..valid_candidate()
        };
        let errors = validate(&candidate).unwrap_err();
        assert_eq!(kinds(&errors, FieldPath::Techs), vec![ErrorKind::DuplicateEntries]);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_row_errors_are_indexed() {
        let candidate = CandidateInput {
            techs: vec![
                tech("Go", "basico"),
                tech("", "basico"),
                tech("Rust", "expert"),
            ],
            ..valid_candidate()
        };
        let errors = validate(&candidate).unwrap_err();

        assert!(errors.get(row_path(0, TechField::Name)).is_empty());
        assert_eq!(
            kinds(&errors, row_path(1, TechField::Name)),
            vec![ErrorKind::Required]
        );
        assert!(errors.get(row_path(1, TechField::Knowledge)).is_empty());
        assert_eq!(
            kinds(&errors, row_path(2, TechField::Knowledge)),
            vec![ErrorKind::InvalidEnum]
        );
        assert!(errors.get(FieldPath::Techs).is_empty());
    }

    #[test]
    fn test_blank_names_are_duplicates() {
        let candidate = CandidateInput {
            techs: vec![tech("", "basico"), tech("  ", "basico")],
            ..valid_candidate()
        };
        let errors = validate(&candidate).unwrap_err();
        assert_eq!(
            kinds(&errors, row_path(0, TechField::Name)),
            vec![ErrorKind::Required]
        );
        assert_eq!(
            kinds(&errors, row_path(1, TechField::Name)),
            vec![ErrorKind::Required]
        );
        assert_eq!(kinds(&errors, FieldPath::Techs), vec![ErrorKind::DuplicateEntries]);
        assert_eq!(
            errors.first(FieldPath::Techs).unwrap().message,
            TECHS_DUPLICATED
        );
    }

    #[test]
    fn test_row_and_list_errors_together() {
        let candidate = CandidateInput {
            techs: vec![tech(" ", "basico")],
            ..valid_candidate()
        };
        let errors = validate(&candidate).unwrap_err();
        assert_eq!(kinds(&errors, FieldPath::Techs), vec![ErrorKind::MinCountNotMet]);
        assert_eq!(
            kinds(&errors, row_path(0, TechField::Name)),
            vec![ErrorKind::Required]
        );
    }

    #[test]
    fn test_collects_all_fields_in_one_pass() {
        let candidate = CandidateInput {
            avatar: vec![FileRef::new("big.png", 2 * 1024 * 1024, "image/png")],
            ..CandidateInput::default()
        };
        let errors = validate(&candidate).unwrap_err();
        assert_eq!(kinds(&errors, FieldPath::Avatar), vec![ErrorKind::SizeExceeded]);
        assert_eq!(kinds(&errors, FieldPath::Name), vec![ErrorKind::Required]);
        assert_eq!(kinds(&errors, FieldPath::Email), vec![ErrorKind::Required]);
        assert_eq!(kinds(&errors, FieldPath::Password), vec![ErrorKind::Required]);
        assert_eq!(kinds(&errors, FieldPath::Techs), vec![ErrorKind::Required]);
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_avatar_first_file_kept() {
        let candidate = CandidateInput {
            avatar: vec![
                FileRef::new("me.png", 2 * 1024 * 1024 - 1, "image/png"),
                FileRef::new("huge.png", 10 * 1024 * 1024, "image/png"),
            ],
            ..valid_candidate()
        };
        let record = validate(&candidate).unwrap();
        assert_eq!(record.avatar().unwrap().name, "me.png");

        let candidate = CandidateInput {
            avatar: vec![FileRef::new("big.png", 3 * 1024 * 1024, "image/png")],
            ..valid_candidate()
        };
        let errors = validate(&candidate).unwrap_err();
        assert_eq!(
            errors.first(FieldPath::Avatar).unwrap().message,
            "O avatar precisa ter no máximo 2mb"
        );
    }

    #[test]
    fn test_english_knowledge_normalized() {
        let candidate = CandidateInput {
            techs: vec![tech("Go", "basic"), tech("Rust", "advanced")],
            ..valid_candidate()
        };
        let record = validate(&candidate).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["techs"][0]["knowledge"], "basico");
        assert_eq!(json["techs"][1]["knowledge"], "avançado");
    }

    #[test]
    fn test_configured_limits() {
        let config = SchemaConfig::default()
            .with_email_domain("@example.org")
            .with_min_techs(3);
        let schema = Schema::new(&config);

        let errors = schema.validate(&valid_candidate()).unwrap_err();
        assert!(errors.has(FieldPath::Email, ErrorKind::DomainNotAllowed));
        assert_eq!(
            errors.first(FieldPath::Techs).unwrap().message,
            "Pelo menos três tecnologias são obrigatórias"
        );
    }

    #[test]
    fn test_rule_halts_only_on_presence() {
        let field = FieldSchema::text()
            .rule(Rule::required("required", not_blank))
            .rule(Rule::new(ErrorKind::TooShort, "short", |v: &str| v.len() > 3))
            .rule(Rule::new(ErrorKind::InvalidFormat, "digits", |v: &str| {
                v.chars().all(|c| c.is_ascii_digit())
            }));

        let kinds_of = |value: &str| -> Vec<ErrorKind> {
            field
                .evaluate(value)
                .err()
                .unwrap_or_default()
                .iter()
                .map(|e| e.kind)
                .collect()
        };

        assert_eq!(kinds_of(""), vec![ErrorKind::Required]);
        assert_eq!(kinds_of("ab"), vec![ErrorKind::TooShort, ErrorKind::InvalidFormat]);
        assert!(kinds_of("1234").is_empty());
        assert_eq!(field.rules().len(), 3);
        assert_eq!(field.rules()[0].kind(), ErrorKind::Required);
        assert_eq!(field.rules()[0].message(), "required");
        assert_eq!(field.rules()[2].kind(), ErrorKind::InvalidFormat);
    }
}
