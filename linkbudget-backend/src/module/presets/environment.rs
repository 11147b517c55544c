use linkbudget_common::EnvironmentProfile;

/// (name, rain fade dB, misc losses dB)
const BUILTIN_ENVIRONMENTS: [(&str, f64, f64); 7] = [
    ("Open/LOS", 0.0, 1.0),
    ("Urban", 1.0, 6.0),
    ("Dense Forest", 1.0, 10.0),
    ("Mountainous", 1.0, 8.0),
    ("Rainy (Tropical)", 10.0, 3.0),
    ("Desert", 0.0, 2.0),
    ("Maritime", 2.0, 3.0),
];

pub fn builtin_environments() -> Vec<EnvironmentProfile> {
    BUILTIN_ENVIRONMENTS
        .iter()
        .map(|(name, rain_fade_db, misc_losses_db)| EnvironmentProfile {
            name: name.to_string(),
            rain_fade_db: *rain_fade_db,
            misc_losses_db: *misc_losses_db,
        })
        .collect()
}
