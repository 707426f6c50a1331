/// Sample recipes inserted on first launch so the list isn't empty
use std::fs;
use std::path::{Path, PathBuf};

use super::repository::RecipeRepository;
use crate::error::Result;

struct Sample {
    title: &'static str,
    ingredients: &'static str,
    instructions: &'static str,
    image_file: &'static str,
}

const SAMPLES: [Sample; 2] = [
    Sample {
        title: "Spaghetti Carbonara",
        ingredients: "Spaghetti, Eggs, Parmesan cheese, Bacon, Pepper",
        instructions: "1. Boil pasta.\n2. Fry bacon.\n3. Mix eggs and cheese.\n4. Combine all with pasta.",
        image_file: "carbonara.jpg",
    },
    Sample {
        title: "Chocolate Cake",
        ingredients: "Flour, Cocoa powder, Sugar, Eggs, Butter, Baking powder",
        instructions: "1. Mix dry ingredients.\n2. Add wet ingredients.\n3. Bake at 180°C for 35 min.",
        image_file: "chocolate_cake.jpg",
    },
];

/// Insert the sample recipes if the catalog is empty.
///
/// An image is attached only when `image_dir` holds the matching file. The
/// stored path is absolute, so the preview keeps working whatever directory
/// the app is launched from. Returns how many recipes were inserted.
pub fn populate_sample_data(
    repository: &RecipeRepository,
    image_dir: Option<&Path>,
) -> Result<usize> {
    if !repository.is_empty()? {
        return Ok(0);
    }

    for sample in &SAMPLES {
        // Missing files fail to canonicalize and are skipped
        let image: Option<PathBuf> =
            image_dir.and_then(|dir| fs::canonicalize(dir.join(sample.image_file)).ok());

        repository.add(
            sample.title,
            sample.ingredients,
            sample.instructions,
            image.as_deref(),
        )?;
    }

    tracing::info!("🌱 Seeded {} sample recipes", SAMPLES.len());
    Ok(SAMPLES.len())
}
