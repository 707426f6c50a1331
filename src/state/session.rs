/// Interaction state machine
///
/// The session owns the repository (and through it the database connection),
/// the current UI mode, and the id of the recipe loaded into the form. The UI
/// forwards each user intent here; the session decides whether it is legal,
/// performs the CRUD call, and pushes display commands back through the
/// [`Surface`] trait.
use std::fmt;
use std::path::PathBuf;

use super::data::{Recipe, RecipeForm};
use super::repository::RecipeRepository;
use crate::error::Result;

/// Form mode, gating which buttons do anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Empty (or just-cleared) form, ready to create a recipe
    #[default]
    Add,
    /// A stored recipe is loaded and editable
    Edit,
    /// A stored recipe is loaded read-only
    View,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Add => "add",
            Mode::Edit => "edit",
            Mode::View => "view",
        };
        f.write_str(name)
    }
}

/// Why an intent was dropped without touching anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    BlankTitle,
    NothingSelected,
    NoCurrentRecipe,
    /// The id pointed at a recipe that is no longer in the store
    RecipeMissing,
}

/// Result of handling one intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored(IgnoreReason),
}

/// What the session needs from whatever is drawing the form and list.
///
/// `selected_recipe_id` is the list selection; it is independent of the
/// recipe the session considers loaded into the form.
pub trait Surface {
    fn form_values(&self) -> RecipeForm;
    fn selected_recipe_id(&self) -> Option<i64>;
    fn update_recipe_list(&mut self, recipes: &[Recipe]);
    fn show_recipe_details(&mut self, recipe: &Recipe);
    fn clear_inputs(&mut self);
    fn set_mode(&mut self, mode: Mode);
    fn set_image_path(&mut self, path: PathBuf);
}

#[derive(Debug)]
pub struct Session {
    repository: RecipeRepository,
    mode: Mode,
    current_recipe_id: Option<i64>,
}

impl Session {
    /// Start in add mode with nothing loaded
    pub fn new(repository: RecipeRepository) -> Self {
        Self {
            repository,
            mode: Mode::Add,
            current_recipe_id: None,
        }
    }

    pub fn repository(&self) -> &RecipeRepository {
        &self.repository
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn current_recipe_id(&self) -> Option<i64> {
        self.current_recipe_id
    }

    /// Push the full recipe list to the surface
    pub fn refresh(&self, surface: &mut impl Surface) -> Result<()> {
        let recipes = self.repository.get_all()?;
        surface.update_recipe_list(&recipes);
        Ok(())
    }

    /// The "Add" button.
    ///
    /// Outside add mode the first press only clears and arms the form; a
    /// second press in add mode commits it. Two clicks in a row therefore
    /// cannot store the same content twice.
    pub fn add_recipe(&mut self, surface: &mut impl Surface) -> Result<Outcome> {
        if self.mode != Mode::Add {
            self.clear(surface);
            return Ok(Outcome::Applied);
        }

        let form = surface.form_values();
        if form.has_blank_title() {
            return Ok(ignored("add", IgnoreReason::BlankTitle));
        }

        self.repository.add_form(&form.trimmed())?;
        self.refresh(surface)?;
        self.clear(surface);
        Ok(Outcome::Applied)
    }

    /// Load the selected recipe into the form for editing
    pub fn edit_selected_recipe(&mut self, surface: &mut impl Surface) -> Result<Outcome> {
        let Some(id) = surface.selected_recipe_id() else {
            return Ok(ignored("edit", IgnoreReason::NothingSelected));
        };
        let Some(recipe) = self.repository.get_by_id(id)? else {
            return Ok(ignored("edit", IgnoreReason::RecipeMissing));
        };

        self.show(surface, &recipe);
        self.switch_mode(surface, Mode::Edit);
        Ok(Outcome::Applied)
    }

    /// Write the form back over the loaded recipe and drop to view mode
    pub fn save_edited_recipe(&mut self, surface: &mut impl Surface) -> Result<Outcome> {
        let Some(id) = self.current_recipe_id else {
            return Ok(ignored("save", IgnoreReason::NoCurrentRecipe));
        };

        let form = surface.form_values();
        if form.has_blank_title() {
            return Ok(ignored("save", IgnoreReason::BlankTitle));
        }

        self.repository.update(&form.trimmed().into_recipe(id))?;
        self.refresh(surface)?;
        if let Some(recipe) = self.repository.get_by_id(id)? {
            self.show(surface, &recipe);
        }
        self.switch_mode(surface, Mode::View);
        Ok(Outcome::Applied)
    }

    /// Throw away unsaved edits.
    ///
    /// With a recipe loaded its stored details are shown again; otherwise the
    /// form is cleared. Either way the form ends up in add mode.
    pub fn cancel_edit(&mut self, surface: &mut impl Surface) -> Result<Outcome> {
        match self.current_recipe_id {
            Some(id) => {
                if let Some(recipe) = self.repository.get_by_id(id)? {
                    self.show(surface, &recipe);
                }
            }
            None => self.clear_form(surface),
        }
        self.switch_mode(surface, Mode::Add);
        Ok(Outcome::Applied)
    }

    /// Delete the recipe selected in the list
    pub fn delete_selected_recipe(&mut self, surface: &mut impl Surface) -> Result<Outcome> {
        let Some(id) = surface.selected_recipe_id() else {
            return Ok(ignored("delete", IgnoreReason::NothingSelected));
        };

        self.repository.delete(id)?;
        self.clear(surface);
        self.refresh(surface)?;
        Ok(Outcome::Applied)
    }

    /// Show the selected recipe read-only
    pub fn display_selected_recipe(&mut self, surface: &mut impl Surface) -> Result<Outcome> {
        let Some(id) = surface.selected_recipe_id() else {
            return Ok(ignored("select", IgnoreReason::NothingSelected));
        };
        let Some(recipe) = self.repository.get_by_id(id)? else {
            return Ok(ignored("select", IgnoreReason::RecipeMissing));
        };

        self.show(surface, &recipe);
        self.switch_mode(surface, Mode::View);
        Ok(Outcome::Applied)
    }

    /// Attach an image picked by the user to the form. `None` means the
    /// dialog was dismissed.
    pub fn select_image(&self, surface: &mut impl Surface, path: Option<PathBuf>) -> Outcome {
        match path {
            Some(path) => {
                surface.set_image_path(path);
                Outcome::Applied
            }
            None => ignored("choose-image", IgnoreReason::NothingSelected),
        }
    }

    fn show(&mut self, surface: &mut impl Surface, recipe: &Recipe) {
        self.current_recipe_id = Some(recipe.id);
        surface.show_recipe_details(recipe);
    }

    fn clear_form(&mut self, surface: &mut impl Surface) {
        self.current_recipe_id = None;
        surface.clear_inputs();
    }

    /// Empty form in add mode
    fn clear(&mut self, surface: &mut impl Surface) {
        self.clear_form(surface);
        self.switch_mode(surface, Mode::Add);
    }

    fn switch_mode(&mut self, surface: &mut impl Surface, mode: Mode) {
        self.mode = mode;
        surface.set_mode(mode);
    }
}

fn ignored(intent: &str, reason: IgnoreReason) -> Outcome {
    tracing::debug!(intent, ?reason, "Intent ignored");
    Outcome::Ignored(reason)
}
