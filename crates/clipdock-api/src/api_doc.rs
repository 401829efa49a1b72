//! OpenAPI document.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::video_upload::upload_video,
        crate::handlers::thumbnail_upload::upload_thumbnail,
        crate::handlers::videos::get_video,
        crate::handlers::videos::list_videos,
    ),
    components(schemas(clipdock_core::models::VideoResponse, crate::error::ErrorResponse)),
    tags(
        (name = "videos", description = "Video publish and metadata endpoints")
    )
)]
pub struct ApiDoc;
