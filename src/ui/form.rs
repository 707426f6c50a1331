/// The recipe form: text fields, image preview and action buttons.
///
/// `FormView` holds every bit of widget state and implements [`Surface`], so
/// the session can drive it without knowing anything about iced.
use iced::widget::{button, column, container, image, row, text, text_editor, text_input};
use iced::{ContentFit, Element, Length};
use std::path::PathBuf;

use super::recipe_list::recipe_list;
use crate::state::data::{Recipe, RecipeForm};
use crate::state::session::{Mode, Surface};
use crate::Message;

/// File types offered by the image picker
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Size of the image preview box
const PREVIEW_WIDTH: f32 = 300.0;
const PREVIEW_HEIGHT: f32 = 200.0;

pub struct FormView {
    title: String,
    ingredients: text_editor::Content,
    instructions: text_editor::Content,
    image_path: Option<PathBuf>,
    recipes: Vec<Recipe>,
    selected: Option<i64>,
    mode: Mode,
}

impl FormView {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            ingredients: text_editor::Content::new(),
            instructions: text_editor::Content::new(),
            image_path: None,
            recipes: Vec::new(),
            selected: None,
            mode: Mode::Add,
        }
    }

    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub fn edit_ingredients(&mut self, action: text_editor::Action) {
        self.ingredients.perform(action);
    }

    pub fn edit_instructions(&mut self, action: text_editor::Action) {
        self.instructions.perform(action);
    }

    /// Mark a list row as selected
    pub fn select(&mut self, id: i64) {
        self.selected = Some(id);
    }

    /// Build the user interface
    pub fn view(&self) -> Element<'_, Message> {
        let fields = column![
            text_input("Recipe Title", &self.title)
                .on_input(Message::TitleChanged)
                .padding(8),
            text_editor(&self.ingredients)
                .placeholder("Ingredients")
                .on_action(Message::IngredientsEdited)
                .height(100),
            text_editor(&self.instructions)
                .placeholder("Instructions")
                .on_action(Message::InstructionsEdited)
                .height(120),
            button("Select Image").on_press(Message::ChooseImage),
            self.image_preview(),
        ]
        .spacing(8);

        let actions = row![
            button("Add Recipe").on_press_maybe(add_enabled(self.mode).then_some(Message::AddRecipe)),
            button("Edit Selected Recipe").on_press(Message::EditRecipe),
            button("Save Changes")
                .on_press_maybe(edit_controls_enabled(self.mode).then_some(Message::SaveRecipe)),
            button("Cancel Edit")
                .on_press_maybe(edit_controls_enabled(self.mode).then_some(Message::CancelEdit)),
            button("Delete Selected Recipe")
                .style(button::danger)
                .on_press(Message::DeleteRecipe),
        ]
        .spacing(6);

        column![
            fields,
            actions,
            recipe_list(&self.recipes, self.selected),
        ]
        .spacing(12)
        .height(Length::Fill)
        .into()
    }

    /// Picture scaled to fit the preview box, keeping its aspect ratio
    fn image_preview(&self) -> Element<'_, Message> {
        let content: Element<'_, Message> = match &self.image_path {
            Some(path) => image(image::Handle::from_path(path))
                .content_fit(ContentFit::Contain)
                .width(PREVIEW_WIDTH)
                .height(PREVIEW_HEIGHT)
                .into(),
            None => text("No Image Selected").into(),
        };

        container(content)
            .center_x(PREVIEW_WIDTH)
            .center_y(PREVIEW_HEIGHT)
            .style(container::bordered_box)
            .into()
    }
}

impl Default for FormView {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for FormView {
    fn form_values(&self) -> RecipeForm {
        RecipeForm::new(
            self.title.clone(),
            self.ingredients.text(),
            self.instructions.text(),
            self.image_path.clone(),
        )
    }

    fn selected_recipe_id(&self) -> Option<i64> {
        self.selected
    }

    /// Replacing the list drops the selection
    fn update_recipe_list(&mut self, recipes: &[Recipe]) {
        self.recipes = recipes.to_vec();
        self.selected = None;
    }

    fn show_recipe_details(&mut self, recipe: &Recipe) {
        self.title = recipe.title.clone();
        self.ingredients = text_editor::Content::with_text(&recipe.ingredients);
        self.instructions = text_editor::Content::with_text(&recipe.instructions);
        self.image_path = recipe.image_path.clone();
    }

    fn clear_inputs(&mut self) {
        self.title.clear();
        self.ingredients = text_editor::Content::new();
        self.instructions = text_editor::Content::new();
        self.image_path = None;
    }

    fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    fn set_image_path(&mut self, path: PathBuf) {
        self.image_path = Some(path);
    }
}

/// "Add" is live everywhere except while editing
fn add_enabled(mode: Mode) -> bool {
    matches!(mode, Mode::Add | Mode::View)
}

/// Save and Cancel only make sense mid-edit
fn edit_controls_enabled(mode: Mode) -> bool {
    mode == Mode::Edit
}
