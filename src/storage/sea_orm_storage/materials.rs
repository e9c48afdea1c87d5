//! 课程资料存储操作

use super::{SeaOrmStorage, classify_db_err, query_err};
use crate::entity::materials::{ActiveModel, Column, Entity as Materials};
use crate::errors::{ClassroomError, Result};
use crate::models::materials::entities::{Material, NewMaterial};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 添加资料
    pub async fn create_material_impl(&self, material: NewMaterial) -> Result<Material> {
        let model = ActiveModel {
            session_id: Set(material.session_id),
            title: Set(material.title),
            blob_ref: Set(material.blob_ref),
            uploaded_at: Set(material.uploaded_at),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| classify_db_err(e, "添加资料失败", ClassroomError::Validation))?;

        Ok(result.into_material())
    }

    pub async fn get_material_by_id_impl(&self, id: i64) -> Result<Option<Material>> {
        let result = Materials::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err("查询资料失败"))?;

        Ok(result.map(|m| m.into_material()))
    }

    /// 列出场次资料，最新在前
    pub async fn list_materials_impl(&self, session_id: i64) -> Result<Vec<Material>> {
        let models = Materials::find()
            .filter(Column::SessionId.eq(session_id))
            .order_by_desc(Column::UploadedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err("查询资料列表失败"))?;

        Ok(models.into_iter().map(|m| m.into_material()).collect())
    }
}
