//! Database schema definitions

/// SQL to create the weight table
pub const CREATE_WEIGHT_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS tbl_weight (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    weight NUMERIC
)
"#;

/// SQL to create the water intake table
pub const CREATE_WATER_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS tbl_water (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    ounces NUMERIC
)
"#;

/// SQL to create the distance table
pub const CREATE_DISTANCE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS tbl_distance (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    miles NUMERIC
)
"#;

/// SQL to create the user profile table
/// Holds at most one row, always with id 1
pub const CREATE_USER_PROFILE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS tbl_user_profile (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    first_name TEXT,
    last_name TEXT,
    gender TEXT,
    age INTEGER,
    height_inches NUMERIC
)
"#;

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![
        CREATE_WEIGHT_TABLE,
        CREATE_WATER_TABLE,
        CREATE_DISTANCE_TABLE,
        CREATE_USER_PROFILE_TABLE,
    ]
}

/// The schema as a single batch script
pub fn schema_script() -> String {
    all_schema_statements()
        .iter()
        .map(|stmt| format!("{};", stmt.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Names of every table the schema creates
pub const TABLE_NAMES: &[&str] = &["tbl_weight", "tbl_water", "tbl_distance", "tbl_user_profile"];
