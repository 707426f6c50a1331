/// Recipe repository
///
/// Translates between raw `RecipeRow`s and `Recipe` records. It does no
/// validation of its own: whatever text it is handed gets trimmed and stored,
/// blank titles included. Rejecting blank titles is the session's job.
use std::path::Path;

use super::data::{Recipe, RecipeForm};
use super::store::RecipeStore;
use crate::error::Result;

#[derive(Debug)]
pub struct RecipeRepository {
    store: RecipeStore,
}

impl RecipeRepository {
    pub fn new(store: RecipeStore) -> Self {
        Self { store }
    }

    /// Get the underlying store
    pub fn store(&self) -> &RecipeStore {
        &self.store
    }

    /// Store a new recipe and return its id
    pub fn add(
        &self,
        title: &str,
        ingredients: &str,
        instructions: &str,
        image_path: Option<&Path>,
    ) -> Result<i64> {
        let id = self.store.insert(
            title.trim(),
            ingredients.trim(),
            instructions.trim(),
            image_path,
        )?;

        tracing::info!("🍲 Added recipe {} ({})", id, title.trim());
        Ok(id)
    }

    /// Convenience wrapper around [`RecipeRepository::add`] for form content
    pub fn add_form(&self, form: &RecipeForm) -> Result<i64> {
        self.add(
            &form.title,
            &form.ingredients,
            &form.instructions,
            form.image_path.as_deref(),
        )
    }

    /// All recipes, in store order
    pub fn get_all(&self) -> Result<Vec<Recipe>> {
        Ok(self
            .store
            .fetch_all()?
            .into_iter()
            .map(Recipe::from)
            .collect())
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Recipe>> {
        Ok(self.store.fetch_by_id(id)?.map(Recipe::from))
    }

    /// Write every field of `recipe` back to the row with its id.
    /// Unknown ids are ignored.
    pub fn update(&self, recipe: &Recipe) -> Result<()> {
        let found = self.store.update(
            recipe.id,
            &recipe.title,
            &recipe.ingredients,
            &recipe.instructions,
            recipe.image_path.as_deref(),
        )?;

        if found {
            tracing::info!("✏️  Updated recipe {}", recipe.id);
        } else {
            tracing::debug!("Update skipped, no recipe with id {}", recipe.id);
        }
        Ok(())
    }

    /// Remove a recipe. Unknown ids are ignored.
    pub fn delete(&self, id: i64) -> Result<()> {
        if self.store.delete(id)? {
            tracing::info!("🗑️  Deleted recipe {}", id);
        } else {
            tracing::debug!("Delete skipped, no recipe with id {}", id);
        }
        Ok(())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.store.count()? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::PathBuf;

    fn repository() -> RecipeRepository {
        RecipeRepository::new(RecipeStore::open_in_memory().unwrap())
    }

    #[test]
    fn test_ids_are_unique() {
        let repo = repository();
        let ids: HashSet<i64> = (0..20)
            .map(|i| repo.add(&format!("Dish {}", i), "", "", None).unwrap())
            .collect();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_add_trims_text_but_not_path() {
        let repo = repository();
        let image = PathBuf::from("/images/ soup.jpg");

        let id = repo
            .add("  Soup  ", " Water,Salt\n", "\tBoil ", Some(image.as_path()))
            .unwrap();
        let recipe = repo.get_by_id(id).unwrap().unwrap();

        assert_eq!(recipe.title, "Soup");
        assert_eq!(recipe.ingredients, "Water,Salt");
        assert_eq!(recipe.instructions, "Boil");
        assert_eq!(recipe.image_path, Some(image));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_image_path_comes_back_exactly() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let repo = repository();
        let image = PathBuf::from(OsStr::from_bytes(b"/img/caf\xE9.jpg"));

        let id = repo.add("Soup", "", "", Some(image.as_path())).unwrap();

        let recipe = repo.get_by_id(id).unwrap().unwrap();
        assert_eq!(recipe.image_path, Some(image.clone()));

        // Writing the record back must not mangle it either
        repo.update(&recipe).unwrap();
        assert_eq!(repo.get_by_id(id).unwrap().unwrap().image_path, Some(image));
    }

    #[test]
    fn test_add_then_list() {
        let repo = repository();
        repo.add("Soup", "Water,Salt", "Boil", None).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Soup");
    }

    #[test]
    fn test_update_replaces_title() {
        let repo = repository();
        let id = repo.add("Soup", "Water", "Boil", None).unwrap();

        let mut recipe = repo.get_by_id(id).unwrap().unwrap();
        recipe.title = "Stew".to_string();
        repo.update(&recipe).unwrap();

        assert_eq!(repo.get_by_id(id).unwrap().unwrap().title, "Stew");
    }

    #[test]
    fn test_update_twice_matches_once() {
        let repo = repository();
        let id = repo.add("Soup", "Water", "Boil", None).unwrap();
        let recipe = Recipe {
            id,
            title: "Stew".to_string(),
            ingredients: "Beef".to_string(),
            instructions: "Simmer".to_string(),
            image_path: Some(PathBuf::from("stew.png")),
        };

        repo.update(&recipe).unwrap();
        let once = repo.get_all().unwrap();
        repo.update(&recipe).unwrap();
        let twice = repo.get_all().unwrap();

        assert_eq!(once, twice);
        assert_eq!(twice, vec![recipe]);
    }

    #[test]
    fn test_update_can_clear_image() {
        let repo = repository();
        let id = repo
            .add("Soup", "", "", Some(Path::new("soup.jpg")))
            .unwrap();

        let mut recipe = repo.get_by_id(id).unwrap().unwrap();
        recipe.image_path = None;
        repo.update(&recipe).unwrap();

        assert_eq!(repo.get_by_id(id).unwrap().unwrap().image_path, None);
    }

    #[test]
    fn test_update_unknown_id_changes_nothing() {
        let repo = repository();
        let ghost = Recipe {
            id: 999,
            title: "Ghost".to_string(),
            ingredients: String::new(),
            instructions: String::new(),
            image_path: None,
        };

        repo.update(&ghost).unwrap();

        assert!(repo.get_all().unwrap().is_empty());
        assert_eq!(repo.get_by_id(999).unwrap(), None);
    }

    #[test]
    fn test_delete_is_final_and_repeatable() {
        let repo = repository();
        let x = repo.add("X", "", "", None).unwrap();
        let y = repo.add("Y", "", "", None).unwrap();
        assert_eq!((x, y), (1, 2));

        repo.delete(x).unwrap();
        repo.delete(x).unwrap();

        assert_eq!(repo.get_by_id(x).unwrap(), None);
        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, 2);
        assert_eq!(all[0].title, "Y");
    }

    #[test]
    fn test_count_tracks_adds_and_deletes() {
        let repo = repository();
        assert!(repo.is_empty().unwrap());

        let ids: Vec<i64> = ["A", "B", "C", "D"]
            .iter()
            .map(|t| repo.add(t, "", "", None).unwrap())
            .collect();
        repo.delete(ids[1]).unwrap();
        repo.delete(ids[3]).unwrap();
        repo.delete(12345).unwrap();

        assert_eq!(repo.get_all().unwrap().len(), 2);
        assert!(!repo.is_empty().unwrap());
    }

    #[test]
    fn test_external_writes_visible_on_next_read() {
        let repo = repository();
        repo.store()
            .insert("Written elsewhere", "", "", None)
            .unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Written elsewhere");
    }
}
