//! Skill list management commands for CLI.

use clap::Subcommand;
use skillplan_core::{PlanStore, Priority, Skill};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum SkillAction {
    /// Add a skill
    Add {
        /// Skill name
        name: String,
        /// Priority: high, medium or low
        #[arg(long, short, default_value = "medium")]
        priority: Priority,
        /// Estimated hours to master
        #[arg(long)]
        hours: f64,
    },
    /// List skills in scheduling order
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a skill by id or name
    Remove {
        /// Skill id or name
        skill: String,
    },
}

pub fn run(action: SkillAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = PlanStore::open()?;

    match action {
        SkillAction::Add { name, priority, hours } => {
            if !(hours.is_finite() && hours > 0.0) {
                return Err(format!("hours must be positive, got {hours}").into());
            }
            let skill = Skill::new(Uuid::new_v4().to_string(), name.trim(), priority, hours);
            let id = skill.id.clone();
            store.update(|state| state.add_skill(skill))?;
            println!("Skill added: {id}");
        }
        SkillAction::List { json } => {
            let mut skills = store.load()?.skills;
            skills.sort_by_key(|s| s.priority);
            if json {
                println!("{}", serde_json::to_string_pretty(&skills)?);
            } else if skills.is_empty() {
                println!("No skills yet. Use 'skill add' to create one.");
            } else {
                for skill in &skills {
                    println!(
                        "{}  {:<6}  {:>6.2}h  {}",
                        skill.id, skill.priority, skill.estimated_hours, skill.name
                    );
                }
            }
        }
        SkillAction::Remove { skill } => {
            let removed = store.update(|state| state.remove_skill(&skill))?;
            println!("Skill removed: {} ({})", removed.name, removed.id);
        }
    }
    Ok(())
}
