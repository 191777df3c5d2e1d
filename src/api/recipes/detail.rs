use crate::api::ingredients::IngredientItem;
use crate::api::tags::TagItem;
use crate::schema::recipes;
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

use super::assoc::{ingredients_for_recipes, tags_for_recipes};

/// Full recipe representation used by detail, create and update responses.
/// The list endpoint uses the reduced [`super::list::RecipeSummary`] instead.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeDetail {
    pub id: i32,
    pub title: String,
    pub time_minutes: i32,
    #[schema(value_type = String, example = "5.50")]
    pub price: BigDecimal,
    pub link: Option<String>,
    pub tags: Vec<TagItem>,
    pub ingredients: Vec<IngredientItem>,
    pub description: Option<String>,
    /// Where to fetch the stored image, when one has been uploaded
    pub image_url: Option<String>,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = recipes)]
struct DetailRow {
    id: i32,
    title: String,
    description: Option<String>,
    time_minutes: i32,
    price: BigDecimal,
    link: Option<String>,
    image_content_type: Option<String>,
}

/// Load the detail representation of one of the user's recipes.
/// Returns `Ok(None)` when the recipe does not exist or belongs to someone
/// else; the two cases are indistinguishable on the wire.
pub fn load_detail(
    conn: &mut PgConnection,
    user_id: i32,
    recipe_id: i32,
) -> QueryResult<Option<RecipeDetail>> {
    let row: Option<DetailRow> = recipes::table
        .filter(recipes::id.eq(recipe_id))
        .filter(recipes::user_id.eq(user_id))
        .select(DetailRow::as_select())
        .first(conn)
        .optional()?;

    let Some(row) = row else {
        return Ok(None);
    };

    let mut tags = tags_for_recipes(conn, &[row.id])?;
    let mut ingredients = ingredients_for_recipes(conn, &[row.id])?;

    Ok(Some(RecipeDetail {
        id: row.id,
        title: row.title,
        time_minutes: row.time_minutes,
        price: row.price,
        link: row.link,
        tags: tags.remove(&row.id).unwrap_or_default(),
        ingredients: ingredients.remove(&row.id).unwrap_or_default(),
        description: row.description,
        image_url: row
            .image_content_type
            .map(|_| format!("/api/recipes/{}/image", row.id)),
    }))
}
