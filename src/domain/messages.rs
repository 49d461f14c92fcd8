//! User-facing response strings.

use std::fmt;
use std::str::FromStr;

/// Language used for user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// Arabic.
    #[default]
    Ar,
    /// English.
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ar" => Ok(Self::Ar),
            "en" => Ok(Self::En),
            other => Err(format!("unsupported locale: {other}")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ar => write!(f, "ar"),
            Self::En => write!(f, "en"),
        }
    }
}

/// Message catalog for one [`Locale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Messages {
    locale: Locale,
}

impl Messages {
    /// Creates the catalog for `locale`.
    #[must_use]
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// The catalog's locale.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Rejection for a name outside the allow-list.
    #[must_use]
    pub const fn invalid_name(&self) -> &'static str {
        match self.locale {
            Locale::Ar => "اسم غير مسموح به!",
            Locale::En => "Name is not allowed!",
        }
    }

    /// Rejection for a repeated registration.
    #[must_use]
    pub const fn already_registered(&self) -> &'static str {
        match self.locale {
            Locale::Ar => "تم التسجيل مسبقاً!",
            Locale::En => "Already registered!",
        }
    }

    /// Rejection when no receiver is left.
    #[must_use]
    pub const fn exhausted(&self) -> &'static str {
        match self.locale {
            Locale::Ar => "تم توزيع جميع الأسماء!",
            Locale::En => "All names have been distributed!",
        }
    }

    /// Rejection when an email is mandatory and missing.
    #[must_use]
    pub const fn email_required(&self) -> &'static str {
        match self.locale {
            Locale::Ar => "البريد الإلكتروني مطلوب!",
            Locale::En => "Email is required!",
        }
    }

    /// Confirmation embedding the assigned receiver.
    #[must_use]
    pub fn registered(&self, receiver: &str) -> String {
        match self.locale {
            Locale::Ar => format!("تم تسجيلك بنجاح! الشخص الذي ستهاديه هو: {receiver}"),
            Locale::En => format!("Registered successfully! Your gift receiver is: {receiver}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_parses_case_insensitively() {
        assert_eq!("AR".parse::<Locale>(), Ok(Locale::Ar));
        assert_eq!(" en ".parse::<Locale>(), Ok(Locale::En));
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn default_locale_is_arabic() {
        assert_eq!(Messages::default().locale(), Locale::Ar);
        assert_eq!(Messages::default().invalid_name(), "اسم غير مسموح به!");
    }

    #[test]
    fn registered_embeds_receiver() {
        let en = Messages::new(Locale::En);
        assert!(en.registered("Aroob").ends_with("Aroob"));

        let ar = Messages::new(Locale::Ar);
        assert!(ar.registered("Salman").contains("Salman"));
    }
}
