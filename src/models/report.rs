use crate::models::flight::Flight;
use schemars::JsonSchema;
use serde::Serialize;

/// Passenger manifest for one flight: the flight header plus one row per
/// confirmed reservation.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ManifestReport {
    pub flight: Flight,
    pub rows: Vec<ManifestRow>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ManifestRow {
    pub reference: String,
    pub username: String,
    pub full_name: String,
    pub quantity: i32,
}

impl ManifestReport {
    pub fn to_csv(&self) -> String {
        let mut out = String::from("reference,username,full_name,seats\n");
        for row in &self.rows {
            out.push_str(&format!(
                "{},{},{},{}\n",
                csv_field(&row.reference),
                csv_field(&row.username),
                csv_field(&row.full_name),
                row.quantity
            ));
        }
        out
    }
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
