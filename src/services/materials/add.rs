use tracing::info;

use super::MaterialService;
use crate::authz::Caller;
use crate::blobs::namespaces;
use crate::errors::Result;
use crate::models::materials::{
    entities::{Material, NewMaterial},
    requests::AddMaterialRequest,
};
use crate::services::sessions::{Access, owned_session};
use crate::utils::validate::{optional_text, require_text};

pub async fn add_material(
    service: &MaterialService,
    caller: &Caller,
    session_id: i64,
    req: AddMaterialRequest,
) -> Result<Material> {
    let ctx = service.ctx();
    let session = owned_session(ctx, caller, session_id, Access::Write).await?;

    let title = match optional_text(req.title) {
        Some(title) => title,
        None => require_text("title", &req.attachment.file_name)?,
    };

    let blob_ref = ctx
        .blobs()
        .put(
            namespaces::MATERIALS,
            &req.attachment.file_name,
            &req.attachment.bytes,
        )
        .await?;

    let material = ctx
        .storage()
        .create_material(NewMaterial {
            session_id: session.id,
            title,
            blob_ref: blob_ref.into_string(),
            uploaded_at: ctx.clock().now().timestamp(),
        })
        .await?;

    info!(
        "Material {} added to session {} by instructor {}",
        material.id, session.id, caller.account_id
    );
    Ok(material)
}
