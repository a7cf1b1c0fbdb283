use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Language {
    #[default]
    #[value(alias = "english")]
    En, // English
    #[value(alias = "dutch", alias = "nederlands")]
    Nl, // Dutch
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Nl => "nl",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "nl" | "dutch" | "nederlands" => Ok(Language::Nl),
            other => Err(format!("unknown language '{other}' (expected en or nl)")),
        }
    }
}

impl TryFrom<String> for Language {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_in_any_case() {
        assert_eq!("NL".parse::<Language>().unwrap(), Language::Nl);
        assert_eq!("Nederlands".parse::<Language>().unwrap(), Language::Nl);
        assert_eq!(" English ".parse::<Language>().unwrap(), Language::En);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn yaml_accepts_aliases_and_writes_codes() {
        let l: Language = serde_yaml::from_str("Dutch").unwrap();
        assert_eq!(l, Language::Nl);
        assert_eq!(serde_yaml::to_string(&Language::Nl).unwrap().trim(), "nl");
    }
}
