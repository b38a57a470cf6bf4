//! Input validation functions
//!
//! Field-level bounds live on the request types as `validator` derives;
//! the checks here cover rules that need more than one field or that the
//! derive cannot express.

use crate::calendar::MAX_UTC_OFFSET_MINUTES;
use crate::models::{ExerciseRecord, SavedMealFood, TemplateExercise};
use crate::units::WeightUnit;

/// Longest accepted name for foods, templates and exercises
pub const MAX_NAME_LEN: usize = 200;

/// Validate a body-weight value in the unit it was entered in
pub fn validate_weight(value: f64, unit: WeightUnit) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if value <= 0.0 {
        return Err("Weight must be greater than zero".to_string());
    }
    if unit.to_kg(value) > 700.0 {
        return Err(format!("Weight must be at most {:.0} {}", unit.from_kg(700.0), unit));
    }
    Ok(())
}

/// Validate calorie value
pub fn validate_calories(calories: f64) -> Result<(), String> {
    if calories.is_nan() || calories.is_infinite() {
        return Err("Calories must be a valid number".to_string());
    }
    if calories < 0.0 {
        return Err("Calories cannot be negative".to_string());
    }
    Ok(())
}

/// Validate protein grams
pub fn validate_protein(grams: f64) -> Result<(), String> {
    if grams.is_nan() || grams.is_infinite() {
        return Err("Protein must be a valid number".to_string());
    }
    if grams < 0.0 {
        return Err("Protein cannot be negative".to_string());
    }
    Ok(())
}

/// Validate a display name (food, template, exercise)
pub fn validate_name(name: &str, what: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(format!("{} name cannot be empty", what));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(format!("{} name must be at most {} characters", what, MAX_NAME_LEN));
    }
    Ok(())
}

/// Validate a client UTC offset in minutes
pub fn validate_utc_offset(minutes: i32) -> Result<(), String> {
    if minutes.abs() > MAX_UTC_OFFSET_MINUTES {
        return Err("UTC offset must be within ±18 hours".to_string());
    }
    Ok(())
}

/// Validate template exercises: at least one, none unnamed
pub fn validate_template_exercises(exercises: &[TemplateExercise]) -> Result<(), String> {
    if exercises.is_empty() {
        return Err("A template needs at least one exercise".to_string());
    }
    exercises
        .iter()
        .try_for_each(|e| validate_name(&e.name, "Exercise"))
}

/// Validate the exercises of a finished session
///
/// Sessions may contain exercises added mid-workout, so only names are checked.
pub fn validate_session_exercises(exercises: &[ExerciseRecord]) -> Result<(), String> {
    exercises
        .iter()
        .try_for_each(|e| validate_name(&e.name, "Exercise"))
}

/// Validate the foods of a saved meal: at least one, each a loggable food
pub fn validate_saved_meal_foods(foods: &[SavedMealFood]) -> Result<(), String> {
    if foods.is_empty() {
        return Err("A saved meal needs at least one food".to_string());
    }
    foods.iter().try_for_each(|food| {
        validate_name(&food.name, "Food")?;
        validate_calories(food.calories)?;
        validate_protein(food.protein_grams)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(80.0, WeightUnit::Kg, true)]
    #[case(176.0, WeightUnit::Lbs, true)]
    #[case(0.0, WeightUnit::Kg, false)]
    #[case(-3.0, WeightUnit::Stone, false)]
    #[case(f64::NAN, WeightUnit::Kg, false)]
    #[case(2000.0, WeightUnit::Lbs, false)]
    fn test_validate_weight(#[case] value: f64, #[case] unit: WeightUnit, #[case] ok: bool) {
        assert_eq!(validate_weight(value, unit).is_ok(), ok);
    }

    #[test]
    fn test_validate_calories_and_protein() {
        assert!(validate_calories(0.0).is_ok());
        assert!(validate_calories(-1.0).is_err());
        assert!(validate_protein(25.5).is_ok());
        assert!(validate_protein(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Oatmeal", "Food").is_ok());
        assert_eq!(validate_name("   ", "Food").unwrap_err(), "Food name cannot be empty");
        assert!(validate_name(&"x".repeat(MAX_NAME_LEN + 1), "Food").is_err());
    }

    #[test]
    fn test_validate_template_exercises() {
        assert!(validate_template_exercises(&[]).is_err());
        assert!(validate_template_exercises(&[TemplateExercise::named("Squat")]).is_ok());
        assert!(validate_template_exercises(&[TemplateExercise::named("")]).is_err());
    }

    #[rstest]
    #[case("Oats", 380.0, 13.0, true)]
    #[case("Water", 0.0, 0.0, true)]
    #[case(" ", 100.0, 1.0, false)]
    #[case("Butter", -5.0, 0.0, false)]
    #[case("Whey", 120.0, f64::NAN, false)]
    fn test_validate_saved_meal_foods(
        #[case] name: &str,
        #[case] calories: f64,
        #[case] protein_grams: f64,
        #[case] ok: bool,
    ) {
        let food = SavedMealFood {
            name: name.to_string(),
            calories,
            protein_grams,
        };
        assert_eq!(validate_saved_meal_foods(&[food]).is_ok(), ok);
    }

    #[test]
    fn test_saved_meal_needs_a_food() {
        assert!(validate_saved_meal_foods(&[]).is_err());
    }

    #[test]
    fn test_validate_utc_offset() {
        assert!(validate_utc_offset(330).is_ok());
        assert!(validate_utc_offset(-600).is_ok());
        assert!(validate_utc_offset(1200).is_err());
    }
}
