/// Scrollable list of recipe titles
use iced::widget::{button, column, scrollable, text, Column};
use iced::{Element, Length, Theme};

use crate::state::data::Recipe;
use crate::Message;

type ButtonStyle = fn(&Theme, button::Status) -> button::Style;

/// One full-width row per recipe; the selected row uses the primary style
pub fn recipe_list<'a>(recipes: &'a [Recipe], selected: Option<i64>) -> Element<'a, Message> {
    if recipes.is_empty() {
        return column![text("No recipes yet").size(14)].padding(10).into();
    }

    let rows = recipes.iter().map(|recipe| -> Element<'a, Message> {
        let style: ButtonStyle = if selected == Some(recipe.id) {
            button::primary
        } else {
            button::text
        };

        button(text(&recipe.title))
            .width(Length::Fill)
            .style(style)
            .on_press(Message::RecipeSelected(recipe.id))
            .into()
    });

    scrollable(Column::with_children(rows).spacing(2))
        .height(Length::Fill)
        .into()
}
