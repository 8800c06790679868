//! Driver record data structures for churn prediction

use serde::{Deserialize, Serialize};

/// Number of input fields in a driver record
pub const FIELD_COUNT: usize = 11;

/// One driver's attributes as entered in the form.
///
/// Field order is the contract with the trained artifacts; serde aliases
/// match the column names used by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverRecord {
    /// Age in years (18-65)
    #[serde(alias = "Age")]
    pub age: i32,

    /// Gender code (0 = female, 1 = male)
    #[serde(alias = "Gender")]
    pub gender: i32,

    /// Monthly income (10,000-500,000)
    #[serde(alias = "Income")]
    pub income: f64,

    /// Designation at joining, 1 being lowest (1-5)
    #[serde(alias = "Joining Designation")]
    pub joining_designation: i32,

    /// Total business value acquired (0-10,000,000)
    #[serde(alias = "Total Business Value")]
    pub total_business_value: f64,

    /// Education level, 2 being highest (0, 1, 2)
    #[serde(alias = "Education_Level")]
    pub education_level: i32,

    /// Most recent grade, 5 being highest (1-5)
    #[serde(alias = "Last_grade")]
    pub last_grade: i32,

    /// Whether income increased over the observation window (0 = no, 1 = yes)
    #[serde(alias = "Income_increased")]
    pub income_increased: i32,

    /// Most recent quarterly rating (1-5)
    #[serde(alias = "Last_rat")]
    pub last_rating: i32,

    /// Grade movement (-1 = decrease, 0 = no change, 1 = increase)
    #[serde(alias = "Grade_improved")]
    pub grade_improved: i32,

    /// Rating delta over the observation window (-4 to 4)
    #[serde(alias = "Rating_change")]
    pub rating_change: i32,
}

impl DriverRecord {
    /// Build a record from the eleven form inputs, in field order.
    pub fn from_inputs(values: [i64; FIELD_COUNT]) -> Self {
        Self {
            age: values[0] as i32,
            gender: values[1] as i32,
            income: values[2] as f64,
            joining_designation: values[3] as i32,
            total_business_value: values[4] as f64,
            education_level: values[5] as i32,
            last_grade: values[6] as i32,
            income_increased: values[7] as i32,
            last_rating: values[8] as i32,
            grade_improved: values[9] as i32,
            rating_change: values[10] as i32,
        }
    }
}

impl Default for DriverRecord {
    /// The form's default answers: mid-range for numeric fields, first
    /// option for enumerated ones.
    fn default() -> Self {
        Self {
            age: 30,
            gender: 0,
            income: 50_000.0,
            joining_designation: 1,
            total_business_value: 10_000.0,
            education_level: 0,
            last_grade: 3,
            income_increased: 0,
            last_rating: 3,
            grade_improved: -1,
            rating_change: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serialization() {
        let record = DriverRecord::default();

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: DriverRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record.age, deserialized.age);
        assert_eq!(record.income, deserialized.income);
        assert_eq!(record.grade_improved, deserialized.grade_improved);
    }

    #[test]
    fn test_training_column_aliases() {
        let json = r#"{
            "Age": 42,
            "Gender": 1,
            "Income": 120000,
            "Joining Designation": 2,
            "Total Business Value": 350000,
            "Education_Level": 2,
            "Last_grade": 4,
            "Income_increased": 1,
            "Last_rat": 5,
            "Grade_improved": 0,
            "Rating_change": 1
        }"#;

        let record: DriverRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.age, 42);
        assert_eq!(record.total_business_value, 350_000.0);
        assert_eq!(record.last_rating, 5);
    }

    #[test]
    fn test_from_inputs_order() {
        let record = DriverRecord::from_inputs([25, 1, 80_000, 3, 500_000, 2, 4, 1, 2, 1, -2]);
        assert_eq!(record.age, 25);
        assert_eq!(record.income, 80_000.0);
        assert_eq!(record.education_level, 2);
        assert_eq!(record.rating_change, -2);
    }
}
