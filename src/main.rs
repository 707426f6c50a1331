use iced::widget::{column, container, text, text_editor};
use iced::{window, Element, Length, Size, Task, Theme};
use rfd::FileDialog;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod state;
mod ui;

use config::Settings;
use state::repository::RecipeRepository;
use state::seed;
use state::session::{Outcome, Session};
use state::store::RecipeStore;
use ui::form::{FormView, IMAGE_EXTENSIONS};

/// Main application state
struct RecipeBook {
    /// Mode, current recipe and the catalog behind them
    session: Session,
    /// Everything on screen
    form: FormView,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    TitleChanged(String),
    IngredientsEdited(text_editor::Action),
    InstructionsEdited(text_editor::Action),
    /// User clicked "Select Image"
    ChooseImage,
    AddRecipe,
    EditRecipe,
    SaveRecipe,
    CancelEdit,
    DeleteRecipe,
    /// User clicked a row in the recipe list
    RecipeSelected(i64),
}

impl RecipeBook {
    fn new(session: Session, form: FormView) -> (Self, Task<Message>) {
        let status = format!("Ready. {} recipes in the book.", form.recipe_count());
        (
            RecipeBook {
                session,
                form,
                status,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        let result = match message {
            Message::TitleChanged(title) => {
                self.form.set_title(title);
                return Task::none();
            }
            Message::IngredientsEdited(action) => {
                self.form.edit_ingredients(action);
                return Task::none();
            }
            Message::InstructionsEdited(action) => {
                self.form.edit_instructions(action);
                return Task::none();
            }
            Message::ChooseImage => {
                // Show the native file picker dialog
                let picked = FileDialog::new()
                    .set_title("Select Recipe Image")
                    .add_filter("Images", &IMAGE_EXTENSIONS)
                    .pick_file();
                Ok(self.session.select_image(&mut self.form, picked))
            }
            Message::AddRecipe => self.session.add_recipe(&mut self.form),
            Message::EditRecipe => self.session.edit_selected_recipe(&mut self.form),
            Message::SaveRecipe => self.session.save_edited_recipe(&mut self.form),
            Message::CancelEdit => self.session.cancel_edit(&mut self.form),
            Message::DeleteRecipe => self.session.delete_selected_recipe(&mut self.form),
            Message::RecipeSelected(id) => {
                self.form.select(id);
                self.session.display_selected_recipe(&mut self.form)
            }
        };

        match result {
            Ok(Outcome::Applied) => {
                self.status = match self.session.current_recipe_id() {
                    Some(id) => format!(
                        "{} recipes · {} mode · recipe #{}",
                        self.form.recipe_count(),
                        self.session.mode(),
                        id
                    ),
                    None => format!(
                        "{} recipes · {} mode",
                        self.form.recipe_count(),
                        self.session.mode()
                    ),
                };
            }
            // Rejected intents leave the form as it is for the user to fix
            Ok(Outcome::Ignored(_)) => {}
            Err(err) => {
                tracing::error!("❌ {}", err);
                self.status = format!("⚠️  {}", err);
            }
        }

        Task::none()
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let content = column![
            self.form.view(),
            text(&self.status).size(14),
        ]
        .spacing(10)
        .padding(20);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn init_logging(settings: &Settings) {
    match settings.log_filter() {
        Ok(filter) => tracing_subscriber::fmt().with_env_filter(filter).init(),
        Err(err) => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("info"))
                .init();
            tracing::warn!(
                "⚠️  Invalid log_level {:?} ({}), using \"info\"",
                settings.log_level,
                err
            );
        }
    }
}

fn main() -> error::Result<()> {
    // Only known before loading, but can only be logged after init_logging
    let created = Settings::default_path().filter(|path| !path.exists());
    let settings = Settings::load_or_create_default()?;
    init_logging(&settings);

    if let Some(path) = created {
        tracing::info!("📝 Wrote default settings to {}", path.display());
    }

    let store = RecipeStore::open(settings.database_path()?)?;
    let session = Session::new(RecipeRepository::new(store));

    if settings.seed_sample_data {
        let image_dir = settings.sample_image_dir();
        seed::populate_sample_data(session.repository(), image_dir.as_deref())?;
    }

    let mut form = FormView::new();
    session.refresh(&mut form)?;

    tracing::info!(
        "🍳 Recipe Book initialized with {} recipes ({})",
        form.recipe_count(),
        session.repository().store().path().display()
    );

    iced::application("Recipe Book", RecipeBook::update, RecipeBook::view)
        .theme(RecipeBook::theme)
        .window(window::Settings {
            size: Size::new(640.0, 860.0),
            min_size: Some(Size::new(600.0, 500.0)),
            ..window::Settings::default()
        })
        .centered()
        .run_with(move || RecipeBook::new(session, form))?;

    Ok(())
}
