//! Service and repository wiring

use std::sync::Arc;

use clipdock_core::Config;
use clipdock_db::{PgVideoRepository, VideoStore};
use clipdock_media::{FfmpegRemuxer, FfprobeProber};
use clipdock_storage::{AssetStore, ObjectStorage};
use sqlx::PgPool;

use crate::services::publish::{PublishLimits, VideoPublishService};
use crate::state::AppState;

/// Build repositories, the media tool adapters, and the publish pipeline.
pub fn initialize_services(
    config: &Config,
    pool: PgPool,
    object_storage: Arc<dyn ObjectStorage>,
    asset_store: Arc<dyn AssetStore>,
) -> Arc<AppState> {
    let videos: Arc<dyn VideoStore> = Arc::new(PgVideoRepository::new(pool));

    let prober = Arc::new(FfprobeProber::new(
        config.ffprobe_path(),
        config.tool_timeout(),
    ));
    let remuxer = Arc::new(FfmpegRemuxer::new(
        config.ffmpeg_path(),
        config.tool_timeout(),
    ));

    let publish = VideoPublishService::new(
        videos.clone(),
        object_storage,
        prober,
        remuxer,
        PublishLimits {
            max_video_bytes: config.max_video_size_bytes(),
            scratch_dir: config.scratch_dir().to_path_buf(),
        },
    );

    Arc::new(AppState {
        videos,
        assets: asset_store,
        publish,
        max_thumbnail_size_bytes: config.max_thumbnail_size_bytes(),
    })
}
