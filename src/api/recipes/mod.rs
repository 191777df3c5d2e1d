pub mod assoc;
pub mod create;
pub mod delete;
pub mod detail;
pub mod get;
pub mod image;
pub mod list;
pub mod update;
pub mod upload_image;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for recipe endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .patch(update::update_recipe)
                .delete(delete::delete_recipe),
        )
        .route("/{id}/upload-image", post(upload_image::upload_image))
        .route("/{id}/image", get(image::get_image))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        create::create_recipe,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
        upload_image::upload_image,
        image::get_image,
    ),
    components(schemas(
        assoc::TagInput,
        assoc::IngredientInput,
        create::CreateRecipeRequest,
        update::UpdateRecipeRequest,
        list::ListRecipesResponse,
        list::RecipeSummary,
        detail::RecipeDetail,
        upload_image::UploadImageRequest,
    ))
)]
pub struct ApiDoc;
