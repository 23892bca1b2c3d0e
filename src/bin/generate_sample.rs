use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Output file; the dashboard loads this name by default.
const OUTPUT_PATH: &str = "ufo-sightings-transformed.csv";
const ROWS: usize = 2000;

const HEADER: [&str; 7] = [
    "Country",
    "UFO_shape",
    "Year",
    "latitude",
    "longitude",
    "Description",
    "length_of_encounter_seconds",
];

/// (name, centre latitude, centre longitude, weight). Weight controls how
/// often the country is drawn; coordinates get jittered per row.
const COUNTRIES: &[(&str, f64, f64, usize)] = &[
    ("United States", 39.8, -98.6, 14),
    ("Canada", 56.1, -106.3, 3),
    ("United Kingdom", 54.0, -2.5, 3),
    ("Australia", -25.3, 133.8, 2),
    ("México", 23.6, -102.5, 2),
    ("Germany", 51.2, 10.4, 1),
    ("France", 46.6, 2.2, 1),
    ("España", 40.2, -3.6, 1),
    ("Brasil", -14.2, -51.9, 1),
    ("New Zealand", -41.8, 172.8, 1),
];

const SHAPES: &[&str] = &[
    "light", "triangle", "circle", "fireball", "unknown", "sphere", "disk",
    "oval", "cigar", "rectangle", "chevron", "diamond", "flash", "teardrop",
    "cone", "cross",
];

const OBJECTS: &[&str] = &[
    "A bright light",
    "A silver disk",
    "An orange fireball",
    "A dark triangle",
    "A glowing sphere",
    "A metallic cigar",
    "Una luz extraña",
    "Un objeto metálico",
];

const MOTIONS: &[&str] = &[
    "hovering silently",
    "moving at incredible speed",
    "drifting west",
    "zigzagging across the sky",
    "descending slowly",
    "splitting into two",
    "pulsing in colour",
];

const PLACES: &[&str] = &[
    "over the lake",
    "above the motorway",
    "near the airfield",
    "behind the cerro",
    "over the château",
    "past the città vecchia",
    "above the río",
];

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);

    // Expand the weights into a pick pool once.
    let country_pool: Vec<usize> = COUNTRIES
        .iter()
        .enumerate()
        .flat_map(|(i, &(_, _, _, weight))| std::iter::repeat(i).take(weight))
        .collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for _ in 0..ROWS {
        let (name, centre_lat, centre_lon, _) =
            COUNTRIES[country_pool[rng.random_range(0..country_pool.len())]];

        let country = if rng.random_bool(0.03) {
            String::new()
        } else {
            name.to_string()
        };

        let shape = if rng.random_bool(0.04) {
            String::new()
        } else {
            SHAPES[rng.random_range(0..SHAPES.len())].to_string()
        };

        // Recent decades dominate, like the real reporting record.
        let year = 1940 + (75.0 * rng.random::<f64>().powf(0.35)) as i32;

        let (latitude, longitude) = if rng.random_bool(0.07) {
            (String::new(), String::new())
        } else {
            let lat = (centre_lat + rng.random_range(-6.0..6.0)).clamp(-90.0, 90.0);
            let lon = (centre_lon + rng.random_range(-8.0..8.0)).clamp(-180.0, 180.0);
            (format!("{lat:.4}"), format!("{lon:.4}"))
        };

        let description = if rng.random_bool(0.05) {
            String::new()
        } else {
            format!(
                "{} {} {}",
                OBJECTS[rng.random_range(0..OBJECTS.len())],
                MOTIONS[rng.random_range(0..MOTIONS.len())],
                PLACES[rng.random_range(0..PLACES.len())],
            )
        };

        let seconds: u32 = rng.random_range(15..=2700);

        writer.write_record([
            country,
            shape,
            year.to_string(),
            latitude,
            longitude,
            description,
            seconds.to_string(),
        ])?;
    }

    writer.flush()?;
    let utf8 = String::from_utf8(
        writer
            .into_inner()
            .map_err(|err| anyhow::anyhow!("finishing csv buffer: {err}"))?,
    )?;
    std::fs::write(OUTPUT_PATH, encode_latin1(&utf8))
        .with_context(|| format!("writing {OUTPUT_PATH}"))?;

    println!("Wrote {ROWS} sightings to {OUTPUT_PATH}");
    Ok(())
}

/// Encode text as Latin-1; anything outside that range becomes '?'.
fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if (c as u32) <= 0xFF { c as u32 as u8 } else { b'?' })
        .collect()
}
