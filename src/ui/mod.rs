/// User interface module
///
/// - `form.rs` - recipe form widgets and the session-facing `Surface`
/// - `recipe_list.rs` - clickable list of stored recipes

pub mod form;
pub mod recipe_list;
