//! Wire types for the catalog API

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

/// A brand as returned by `GET brands/`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrandRecord {
    /// Brand id
    pub id: u32,
    /// Display name
    pub name: String,
    /// Logo URL
    #[serde(default)]
    pub image: Option<String>,
}

/// An animal type as returned by `GET animals/`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnimalType {
    /// Animal type id
    pub id: u32,
    /// Display name
    pub name: String,
    /// Illustration URL
    #[serde(default)]
    pub image: Option<String>,
}

/// A catalog subcategory
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subcategory {
    /// Subcategory id
    pub id: u32,
    /// Display name
    pub name: String,
    /// Discount percentage applied to the whole subcategory
    #[serde(default)]
    pub discount_subcategory: Option<u32>,
}

/// A catalog group with its subcategories, as returned by `GET categories/`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductSummary {
    /// Category id
    pub id: u32,
    /// Display name
    pub name: String,
    /// Subcategories in display order
    #[serde(default, rename = "subcategory")]
    pub subcategories: Vec<Subcategory>,
}

/// A blog article
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    /// Article id
    pub id: u32,
    /// Headline
    pub title: String,
    /// Rich HTML body, rendered verbatim
    #[serde(default)]
    pub description: String,
    /// Cover image URL
    #[serde(default)]
    pub image: Option<String>,
    /// Estimated reading time, free text ("5 минут")
    #[serde(default)]
    pub time_read: String,
    /// Publication date
    pub date_added: NaiveDate,
    /// Animal type the article is about
    #[serde(default, rename = "animals")]
    pub animal: Option<u32>,
}

/// A published customer review, as returned by `GET comments/`
///
/// The list endpoint never exposes the author's phone number.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewRecord {
    /// Review id
    #[serde(default)]
    pub id: Option<u32>,
    /// Author name
    #[serde(rename = "name_author")]
    pub author: String,
    /// Pet name
    #[serde(default, rename = "name_animal")]
    pub animal: Option<String>,
    /// Review text
    #[serde(rename = "body_of_comment")]
    pub body: String,
}

/// A review submission, sent with `POST comments/`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewReview {
    /// Author name
    #[serde(rename = "name_author")]
    pub author: String,
    /// Contact phone number
    #[serde(rename = "phone_number")]
    pub phone: String,
    /// Pet name
    #[serde(rename = "name_animal")]
    pub animal: String,
    /// Review text
    #[serde(rename = "body_of_comment")]
    pub body: String,
}

/// Review fields rejected before submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReviewValidationError {
    /// Author name is not two Latin or two Cyrillic words
    #[error("invalid author name")]
    InvalidAuthorName,
    /// Phone number is not a Belarusian mobile number
    #[error("invalid phone number")]
    InvalidPhoneNumber,
    /// Pet name is not two Latin or two Cyrillic words
    #[error("invalid animal name")]
    InvalidAnimalName,
    /// Review text is blank
    #[error("review text is empty")]
    EmptyBody,
}

#[allow(clippy::expect_used)]
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[А-Яа-я][а-яё]{1,30}\s{0,3}[А-Яа-я][а-яё]{1,30}|[A-Za-z][a-z]{1,30}\s{0,3}[A-Za-z][a-z]{1,30})$",
    )
    .expect("hardcoded name pattern should always compile")
});

#[allow(clippy::expect_used)]
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\+375)?(?:33|44|25|29)?[0-9]{7}$")
        .expect("hardcoded phone pattern should always compile")
});

impl NewReview {
    /// Create a submission
    #[must_use]
    pub fn new(
        author: impl Into<String>,
        phone: impl Into<String>,
        animal: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            phone: phone.into(),
            animal: animal.into(),
            body: body.into(),
        }
    }

    /// Check the fields against the rules the backend enforces
    ///
    /// # Errors
    ///
    /// Returns the first field that fails, in form order
    pub fn validate(&self) -> Result<(), ReviewValidationError> {
        if !NAME_PATTERN.is_match(&self.author) {
            return Err(ReviewValidationError::InvalidAuthorName);
        }
        if !PHONE_PATTERN.is_match(&self.phone) {
            return Err(ReviewValidationError::InvalidPhoneNumber);
        }
        if !NAME_PATTERN.is_match(&self.animal) {
            return Err(ReviewValidationError::InvalidAnimalName);
        }
        if self.body.trim().is_empty() {
            return Err(ReviewValidationError::EmptyBody);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review() -> NewReview {
        NewReview::new("Anna Petrova", "+375291234567", "Rex Barker", "Great shop")
    }

    #[test]
    fn test_valid_review() {
        assert_eq!(review().validate(), Ok(()));

        let cyrillic = NewReview::new("Анна Иванова", "1234567", "Шарик Пёсик", "Спасибо");
        assert_eq!(cyrillic.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_single_word_name() {
        let mut bad = review();
        bad.author = "Anna".into();
        assert_eq!(bad.validate(), Err(ReviewValidationError::InvalidAuthorName));
    }

    #[test]
    fn test_rejects_mixed_alphabets() {
        let mut bad = review();
        bad.animal = "Rex Шарик".into();
        assert_eq!(bad.validate(), Err(ReviewValidationError::InvalidAnimalName));
    }

    #[test]
    fn test_phone_rules() {
        for phone in ["+375291234567", "291234567", "1234567", "+3751234567"] {
            let mut ok = review();
            ok.phone = phone.into();
            assert_eq!(ok.validate(), Ok(()), "{phone} should be accepted");
        }
        for phone in ["123456", "+375 29 1234567", "+7291234567", "phone"] {
            let mut bad = review();
            bad.phone = phone.into();
            assert_eq!(
                bad.validate(),
                Err(ReviewValidationError::InvalidPhoneNumber),
                "{phone} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_blank_body() {
        let mut bad = review();
        bad.body = "   ".into();
        assert_eq!(bad.validate(), Err(ReviewValidationError::EmptyBody));
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_value(review()).unwrap();
        assert_eq!(json["name_author"], "Anna Petrova");
        assert_eq!(json["phone_number"], "+375291234567");
        assert_eq!(json["name_animal"], "Rex Barker");
        assert_eq!(json["body_of_comment"], "Great shop");
    }

    #[test]
    fn test_decode_article() {
        let article: Article = serde_json::from_str(
            r#"{"id": 4, "title": "Winter walks", "animals": 2,
                "description": "<p>Hi</p>", "image": null,
                "time_read": "5 min", "date_added": "2023-01-15", "is_active": true}"#,
        )
        .unwrap();
        assert_eq!(article.animal, Some(2));
        assert_eq!(
            article.date_added,
            NaiveDate::from_ymd_opt(2023, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_decode_category() {
        let summary: ProductSummary = serde_json::from_str(
            r#"{"id": 1, "name": "Food", "subcategory": [
                {"id": 10, "name": "Dry", "discount_subcategory": 15},
                {"id": 11, "name": "Wet", "discount_subcategory": null}
            ]}"#,
        )
        .unwrap();
        assert_eq!(summary.subcategories.len(), 2);
        assert_eq!(summary.subcategories[0].discount_subcategory, Some(15));
        assert_eq!(summary.subcategories[1].discount_subcategory, None);
    }
}
