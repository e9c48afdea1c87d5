use super::{MaterialService, visible_session};
use crate::authz::Caller;
use crate::blobs::BlobRef;
use crate::errors::{ClassroomError, Result};
use crate::models::materials::entities::Material;

pub async fn list_materials(
    service: &MaterialService,
    caller: &Caller,
    session_id: i64,
) -> Result<Vec<Material>> {
    let ctx = service.ctx();
    let session = visible_session(ctx, caller, session_id).await?;
    ctx.storage().list_materials(session.id).await
}

pub async fn download_material(
    service: &MaterialService,
    caller: &Caller,
    material_id: i64,
) -> Result<(String, Vec<u8>)> {
    let ctx = service.ctx();
    let material = ctx
        .storage()
        .get_material_by_id(material_id)
        .await?
        .ok_or_else(|| ClassroomError::not_found(format!("material {material_id}")))?;

    visible_session(ctx, caller, material.session_id).await?;

    let blob_ref = BlobRef::new(material.blob_ref);
    let bytes = ctx.blobs().get(&blob_ref).await?;
    Ok((blob_ref.file_name().to_string(), bytes))
}
