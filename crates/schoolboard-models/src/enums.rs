//! Enumerations shared by several entities, stored as PostgreSQL enum types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "user_sex", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserSex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "day", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    pub const ALL: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "blood_type")]
pub enum BloodType {
    #[sqlx(rename = "A+")]
    #[serde(rename = "A+")]
    APositive,
    #[sqlx(rename = "A-")]
    #[serde(rename = "A-")]
    ANegative,
    #[sqlx(rename = "B+")]
    #[serde(rename = "B+")]
    BPositive,
    #[sqlx(rename = "B-")]
    #[serde(rename = "B-")]
    BNegative,
    #[sqlx(rename = "AB+")]
    #[serde(rename = "AB+")]
    AbPositive,
    #[sqlx(rename = "AB-")]
    #[serde(rename = "AB-")]
    AbNegative,
    #[sqlx(rename = "O+")]
    #[serde(rename = "O+")]
    OPositive,
    #[sqlx(rename = "O-")]
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodType {
    pub const ALL: [BloodType; 8] = [
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::OPositive,
        BloodType::ONegative,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names() {
        assert_eq!(serde_json::to_string(&UserSex::Female).unwrap(), r#""FEMALE""#);
        assert_eq!(serde_json::to_string(&Day::Wednesday).unwrap(), r#""WEDNESDAY""#);
        assert_eq!(serde_json::to_string(&BloodType::AbNegative).unwrap(), r#""AB-""#);
    }

    #[test]
    fn rejects_unknown_members() {
        assert!(serde_json::from_str::<UserSex>(r#""OTHER""#).is_err());
        assert!(serde_json::from_str::<Day>(r#""SATURDAY""#).is_err());
        assert!(serde_json::from_str::<BloodType>(r#""C+""#).is_err());
    }
}
