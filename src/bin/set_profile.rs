//! Utility to set the user profile in the database
//!
//! Usage: set_profile <name> <age> <gender> <height_cm> <weight_kg> [goal]

use fittrack::tools::profile::{set_profile, ProfileInput};

const USAGE: &str = "Usage: set_profile <name> <age> <gender> <height_cm> <weight_kg> [lose|maintain|gain]";

fn parse_args(args: &[String]) -> Result<ProfileInput, String> {
    if args.len() < 5 || args.len() > 6 {
        return Err(USAGE.to_string());
    }

    Ok(ProfileInput {
        name: args[0].clone(),
        age: args[1].parse().map_err(|_| format!("Invalid age: {}", args[1]))?,
        gender: args[2].clone(),
        height_cm: args[3].parse().map_err(|_| format!("Invalid height: {}", args[3]))?,
        weight_kg: args[4].parse().map_err(|_| format!("Invalid weight: {}", args[4]))?,
        goal: args.get(5).cloned(),
        daily_water_target: None,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let input = parse_args(&args)?;

    let db_path = fittrack::config::database_path();
    println!("Database path: {}", db_path.display());

    let database = fittrack::db::Database::open(&db_path)?;

    let detail = set_profile(&database, input)?;
    let profile = &detail.profile;
    println!("Profile set:");
    println!("  Name: {}", profile.name);
    println!("  Age: {}", profile.age);
    println!("  Gender: {}", profile.gender.as_str());
    println!("  Height: {} cm", profile.height_cm);
    println!("  Weight: {} kg", profile.weight_kg);
    println!("  Goal: {}", profile.goal.as_str());
    println!("  BMI: {:.2}", profile.bmi);
    if let Some(class) = &detail.bmi_classification {
        println!("  BMI category: {}", class.label);
    }
    println!("  Daily calorie target: {} kcal", profile.daily_calorie_target);
    println!("  Updated: {}", profile.updated_at);

    Ok(())
}
