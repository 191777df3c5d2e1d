//! Tag and ingredient associations for recipes.
//!
//! Nested writes never create duplicate rows: names are get-or-created
//! keyed on (user, name), so a name reappearing across recipes reuses the
//! existing row.

use crate::api::ingredients::IngredientItem;
use crate::api::tags::TagItem;
use crate::models::{NewIngredient, NewRecipeIngredient, NewRecipeTag, NewTag};
use crate::schema::{ingredients, recipe_ingredients, recipe_tags, tags};
use diesel::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use utoipa::ToSchema;

/// Nested tag reference in recipe payloads
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TagInput {
    pub name: String,
}

/// Nested ingredient reference in recipe payloads
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct IngredientInput {
    pub name: String,
}

pub fn get_or_create_tag(conn: &mut PgConnection, user_id: i32, name: &str) -> QueryResult<i32> {
    // Race-safe: the insert is a no-op when the row exists, the select
    // then sees whichever row won.
    diesel::insert_into(tags::table)
        .values(NewTag { user_id, name })
        .on_conflict((tags::user_id, tags::name))
        .do_nothing()
        .execute(conn)?;

    tags::table
        .filter(tags::user_id.eq(user_id))
        .filter(tags::name.eq(name))
        .select(tags::id)
        .first(conn)
}

pub fn get_or_create_ingredient(
    conn: &mut PgConnection,
    user_id: i32,
    name: &str,
) -> QueryResult<i32> {
    diesel::insert_into(ingredients::table)
        .values(NewIngredient { user_id, name })
        .on_conflict((ingredients::user_id, ingredients::name))
        .do_nothing()
        .execute(conn)?;

    ingredients::table
        .filter(ingredients::user_id.eq(user_id))
        .filter(ingredients::name.eq(name))
        .select(ingredients::id)
        .first(conn)
}

pub fn attach_tags(
    conn: &mut PgConnection,
    user_id: i32,
    recipe_id: i32,
    inputs: &[TagInput],
) -> QueryResult<()> {
    for input in inputs {
        let tag_id = get_or_create_tag(conn, user_id, input.name.trim())?;
        diesel::insert_into(recipe_tags::table)
            .values(NewRecipeTag { recipe_id, tag_id })
            .on_conflict_do_nothing()
            .execute(conn)?;
    }
    Ok(())
}

pub fn attach_ingredients(
    conn: &mut PgConnection,
    user_id: i32,
    recipe_id: i32,
    inputs: &[IngredientInput],
) -> QueryResult<()> {
    for input in inputs {
        let ingredient_id = get_or_create_ingredient(conn, user_id, input.name.trim())?;
        diesel::insert_into(recipe_ingredients::table)
            .values(NewRecipeIngredient {
                recipe_id,
                ingredient_id,
            })
            .on_conflict_do_nothing()
            .execute(conn)?;
    }
    Ok(())
}

/// Clear the recipe's tag associations and re-attach the submitted list.
pub fn replace_tags(
    conn: &mut PgConnection,
    user_id: i32,
    recipe_id: i32,
    inputs: &[TagInput],
) -> QueryResult<()> {
    diesel::delete(recipe_tags::table.filter(recipe_tags::recipe_id.eq(recipe_id)))
        .execute(conn)?;
    attach_tags(conn, user_id, recipe_id, inputs)
}

/// Clear the recipe's ingredient associations and re-attach the submitted list.
pub fn replace_ingredients(
    conn: &mut PgConnection,
    user_id: i32,
    recipe_id: i32,
    inputs: &[IngredientInput],
) -> QueryResult<()> {
    diesel::delete(
        recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(recipe_id)),
    )
    .execute(conn)?;
    attach_ingredients(conn, user_id, recipe_id, inputs)
}

/// Batch-load tags for a set of recipes, keyed by recipe id.
pub fn tags_for_recipes(
    conn: &mut PgConnection,
    recipe_ids: &[i32],
) -> QueryResult<HashMap<i32, Vec<TagItem>>> {
    if recipe_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<(i32, i32, String)> = recipe_tags::table
        .inner_join(tags::table)
        .filter(recipe_tags::recipe_id.eq_any(recipe_ids))
        .select((recipe_tags::recipe_id, tags::id, tags::name))
        .order(tags::name.asc())
        .load(conn)?;

    let mut map: HashMap<i32, Vec<TagItem>> = HashMap::new();
    for (recipe_id, id, name) in rows {
        map.entry(recipe_id).or_default().push(TagItem { id, name });
    }
    Ok(map)
}

/// Batch-load ingredients for a set of recipes, keyed by recipe id.
pub fn ingredients_for_recipes(
    conn: &mut PgConnection,
    recipe_ids: &[i32],
) -> QueryResult<HashMap<i32, Vec<IngredientItem>>> {
    if recipe_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<(i32, i32, String)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq_any(recipe_ids))
        .select((
            recipe_ingredients::recipe_id,
            ingredients::id,
            ingredients::name,
        ))
        .order(ingredients::name.asc())
        .load(conn)?;

    let mut map: HashMap<i32, Vec<IngredientItem>> = HashMap::new();
    for (recipe_id, id, name) in rows {
        map.entry(recipe_id)
            .or_default()
            .push(IngredientItem { id, name });
    }
    Ok(map)
}
