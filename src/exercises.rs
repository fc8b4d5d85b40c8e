//! Exercise definitions - local exercise catalog

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Coarse body region, used for the ExerciseDB body-part bonus
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BodyRegion {
    Lower,
    Upper,
    Core,
    Full,
}

impl BodyRegion {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyRegion::Lower => "lower",
            BodyRegion::Upper => "upper",
            BodyRegion::Core => "core",
            BodyRegion::Full => "full",
        }
    }
}

impl fmt::Display for BodyRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Squat,
    Hinge,
    SingleLeg,
    Pull,
    Push,
    CalfTib,
    Posture,
    Core,
    Mobility,
    Other,
}

impl Category {
    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Squat => "🦵",
            Category::Hinge => "🏋️",
            Category::SingleLeg => "🚶",
            Category::Pull => "🪢",
            Category::Push => "💪",
            Category::CalfTib => "🦶",
            Category::Posture => "🧍",
            Category::Core => "🎯",
            Category::Mobility => "🌀",
            Category::Other => "•",
        }
    }
}

/// Built-in catalog entry
#[derive(Debug, Clone)]
pub struct Exercise {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub body_region: BodyRegion,
    pub equipment: &'static [&'static str],
    /// Search term to use on ExerciseDB instead of `name`
    pub exercise_db_name: Option<&'static str>,
}

impl Exercise {
    pub fn to_local(&self) -> LocalExercise {
        LocalExercise {
            id: self.id.to_string(),
            name: self.name.to_string(),
            equipment: self.equipment.iter().map(|e| e.to_string()).collect(),
            body_region: self.body_region,
            search_name: self.exercise_db_name.map(str::to_string),
        }
    }
}

/// Exercise as seen by the mapper. Loaded once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocalExercise {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub equipment: Vec<String>,
    pub body_region: BodyRegion,
    #[serde(default, alias = "exerciseDbName", skip_serializing_if = "Option::is_none")]
    pub search_name: Option<String>,
}

impl LocalExercise {
    /// Name sent to ExerciseDB: the override if present, else the display name
    pub fn search_name(&self) -> &str {
        self.search_name.as_deref().unwrap_or(&self.name)
    }
}

macro_rules! exercise {
    ($id:literal, $name:literal, $cat:ident, $region:ident, [$($eq:literal),*]) => {
        exercise!($id, $name, $cat, $region, [$($eq),*], None)
    };
    ($id:literal, $name:literal, $cat:ident, $region:ident, [$($eq:literal),*], $db:expr) => {
        Exercise {
            id: $id,
            name: $name,
            category: Category::$cat,
            body_region: BodyRegion::$region,
            equipment: &[$($eq),*],
            exercise_db_name: $db,
        }
    };
}

/// Exercises referenced by the workout templates
pub const EXERCISES: &[Exercise] = &[
    // Squat
    exercise!("goblet_squat", "Goblet Squat", Squat, Lower, ["kettlebell", "dumbbell"]),
    exercise!("hack_squat_machine", "Hack Squat Machine", Squat, Lower, ["sled", "machine"], Some("sled hack squat")),
    exercise!("leg_press", "Leg Press", Squat, Lower, ["machine", "sled"]),
    // Hinge
    exercise!("rdl", "Romanian Deadlift", Hinge, Lower, ["barbell", "dumbbell"]),
    exercise!("trap_bar_deadlift", "Trap Bar Deadlift", Hinge, Lower, ["trap bar"]),
    exercise!("cable_pull_through", "Cable Pull-Through", Hinge, Lower, ["cable"]),
    exercise!("back_extension_glutes", "Back Extension (Glute Focus)", Hinge, Lower, ["body weight", "bench"]),
    exercise!("hip_thrust_barbell", "Barbell Hip Thrust", Hinge, Lower, ["barbell"]),
    exercise!("glute_bridge_db", "Glute Bridge (Dumbbell)", Hinge, Lower, ["dumbbell"]),
    // Single leg
    exercise!("bulgarian_split_squat", "Bulgarian Split Squat", SingleLeg, Lower, ["dumbbell", "body weight"]),
    exercise!("reverse_lunge", "Reverse Lunge", SingleLeg, Lower, ["dumbbell", "body weight"]),
    exercise!("step_up", "Step-Up", SingleLeg, Lower, ["dumbbell", "box"]),
    exercise!("single_leg_leg_press", "Single-Leg Leg Press", SingleLeg, Lower, ["machine", "sled"]),
    exercise!("seated_hamstring_curl", "Seated Hamstring Curl", Hinge, Lower, ["leverage machine", "machine"], Some("lever seated leg curl")),
    exercise!("lying_hamstring_curl", "Lying Hamstring Curl", Hinge, Lower, ["leverage machine", "machine"], Some("lever lying leg curl")),
    // Calves / tib
    exercise!("standing_calf_raise", "Standing Calf Raise", CalfTib, Lower, ["leverage machine", "smith machine", "body weight"]),
    exercise!("seated_calf_raise", "Seated Calf Raise", CalfTib, Lower, ["leverage machine", "machine"]),
    exercise!("calf_isometric_hold", "Calf Raise Isometric Hold", CalfTib, Lower, ["body weight"]),
    exercise!("tibialis_raise", "Tibialis Raise", CalfTib, Lower, ["body weight"]),
    // Pull
    exercise!("chest_supported_row", "Chest-Supported Row", Pull, Upper, ["dumbbell", "bench"]),
    exercise!("seated_cable_row", "Seated Cable Row", Pull, Upper, ["cable"]),
    exercise!("lat_pulldown", "Lat Pulldown", Pull, Upper, ["cable", "leverage machine"]),
    exercise!("one_arm_cable_row", "One-Arm Cable Row", Pull, Upper, ["cable"]),
    // Push
    exercise!("incline_db_press", "Incline Dumbbell Press", Push, Upper, ["dumbbell", "bench"], Some("dumbbell incline bench press")),
    exercise!("machine_chest_press", "Machine Chest Press", Push, Upper, ["leverage machine", "machine"], Some("lever chest press")),
    exercise!("landmine_press", "Landmine Press", Push, Upper, ["barbell"]),
    exercise!("cable_press_single_arm", "Single-Arm Cable Press", Push, Upper, ["cable"]),
    exercise!("lateral_raise", "Lateral Raise", Push, Upper, ["dumbbell", "cable"]),
    // Posture
    exercise!("reverse_pec_deck", "Reverse Pec Deck", Posture, Upper, ["leverage machine", "machine"]),
    exercise!("face_pull", "Face Pull", Posture, Upper, ["cable", "band"]),
    exercise!("external_rotation_cable", "Cable External Rotation", Posture, Upper, ["cable"]),
    exercise!("band_pull_apart", "Band Pull-Apart", Posture, Upper, ["band"]),
    exercise!("chin_tuck", "Chin Tuck", Posture, Upper, ["body weight"]),
    exercise!("wall_slide", "Wall Slide with Reach", Posture, Upper, ["body weight"]),
    // Mobility
    exercise!("thoracic_extension_roller", "Thoracic Extension on Foam Roller", Mobility, Upper, ["roller"]),
    exercise!("open_book", "Open Book T-Spine Rotation", Mobility, Upper, ["body weight"]),
    exercise!("pec_doorway_stretch", "Pec Doorway Stretch", Mobility, Upper, ["body weight"]),
    // Core / carry
    exercise!("dead_bug", "Dead Bug", Core, Core, ["body weight"]),
    exercise!("side_plank", "Side Plank", Core, Core, ["body weight"]),
    exercise!("pallof_press", "Pallof Press", Core, Core, ["cable", "band"]),
    exercise!("suitcase_carry", "Suitcase Carry", Core, Full, ["dumbbell", "kettlebell"]),
    exercise!("farmer_carry", "Farmer Carry", Other, Full, ["dumbbell", "kettlebell", "trap bar"], Some("farmers walk")),
];

/// Built-in entry by id, used for category lookups in `list`
pub fn find_exercise(id: &str) -> Option<&'static Exercise> {
    EXERCISES.iter().find(|e| e.id == id)
}

/// Built-in catalog in mapper form, in catalog order
pub fn builtin_catalog() -> Vec<LocalExercise> {
    EXERCISES.iter().map(Exercise::to_local).collect()
}

/// Load a catalog from a JSON array of exercises
pub fn load_catalog(path: &Path) -> Result<Vec<LocalExercise>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let exercises: Vec<LocalExercise> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse catalog {}", path.display()))?;
    Ok(exercises)
}
