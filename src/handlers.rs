use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::StreamExt;
use uuid::Uuid;

use crate::classifier::EntropySource;
use crate::error::AnalyzeError;
use crate::models::UploadedFile;

const FILE_FIELD: &str = "file";

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/analyze").route(web::post().to(analyze)));
}

#[tracing::instrument(name = "analyze", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn analyze(
    payload: Multipart,
    entropy: web::Data<EntropySource>,
) -> Result<HttpResponse, AnalyzeError> {
    let upload = read_upload(payload).await.map_err(|e| {
        tracing::warn!(error = %e, "rejected upload");
        e
    })?;

    match entropy.classify(&upload.filename) {
        Ok(result) => {
            tracing::info!(
                filename = %upload.filename,
                bytes = upload.size,
                class = ?result.class,
                confidence = %result.confidence,
                "classified upload"
            );
            Ok(HttpResponse::Ok().json(result))
        }
        Err(e) => {
            tracing::warn!(filename = %upload.filename, "unrecognized filename prefix");
            Err(e)
        }
    }
}

/// Drains every field and keeps the first `file` field that carries a filename.
async fn read_upload(mut payload: Multipart) -> Result<UploadedFile, AnalyzeError> {
    let mut upload: Option<UploadedFile> = None;

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let disposition = field.content_disposition();
        let filename = match (disposition.get_name(), disposition.get_filename()) {
            (Some(FILE_FIELD), Some(filename)) if upload.is_none() => Some(filename.to_owned()),
            _ => None,
        };

        let mut size = 0;
        while let Some(chunk) = field.next().await {
            size += chunk?.len();
        }

        if let Some(filename) = filename {
            upload = Some(UploadedFile { filename, size });
        }
    }

    upload.ok_or(AnalyzeError::MissingFile)
}
