pub mod add;
pub mod list;

use crate::authz::{Caller, Ownership, authorize};
use crate::errors::Result;
use crate::models::{
    accounts::entities::Role, materials::entities::Material,
    materials::requests::AddMaterialRequest, sessions::entities::Session,
};

use super::ServiceContext;
use super::sessions::{Access, find_session, owned_session, require_enrollment};

/// 资料可见性：属主教师或已选学员
pub(crate) async fn visible_session(
    ctx: &ServiceContext,
    caller: &Caller,
    session_id: i64,
) -> Result<Session> {
    authorize(caller, &[Role::Instructor, Role::Learner], Ownership::Unscoped)?;

    match caller.role {
        Role::Instructor => owned_session(ctx, caller, session_id, Access::Read).await,
        _ => {
            let session = find_session(ctx, session_id).await?;
            require_enrollment(ctx, caller, session.id).await?;
            Ok(session)
        }
    }
}

pub struct MaterialService {
    ctx: ServiceContext,
}

impl MaterialService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub(crate) fn ctx(&self) -> &ServiceContext {
        &self.ctx
    }

    // 上传资料（属主教师）
    pub async fn add_material(
        &self,
        caller: &Caller,
        session_id: i64,
        req: AddMaterialRequest,
    ) -> Result<Material> {
        add::add_material(self, caller, session_id, req).await
    }

    // 场次资料列表
    pub async fn list_materials(&self, caller: &Caller, session_id: i64) -> Result<Vec<Material>> {
        list::list_materials(self, caller, session_id).await
    }

    // 下载资料，返回文件名与内容
    pub async fn download_material(
        &self,
        caller: &Caller,
        material_id: i64,
    ) -> Result<(String, Vec<u8>)> {
        list::download_material(self, caller, material_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ClassroomError;
    use crate::models::Attachment;
    use crate::test_utils::{caller, seed_account, seed_session, setup_test_context};

    fn upload(title: Option<&str>, file_name: &str) -> AddMaterialRequest {
        AddMaterialRequest {
            title: title.map(str::to_string),
            attachment: Attachment::new(file_name, b"slides".to_vec()),
        }
    }

    #[tokio::test]
    async fn test_only_owner_adds_materials() {
        let ctx = setup_test_context().await;
        let owner = seed_account(&ctx, "owner", Role::Instructor).await;
        let other = seed_account(&ctx, "other", Role::Instructor).await;
        let learner = caller(&seed_account(&ctx, "learn", Role::Learner).await);
        let session = seed_session(&ctx, &owner, "Optics").await;
        let service = ctx.materials();

        let err = service
            .add_material(&caller(&other), session.id, upload(None, "a.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::Forbidden(_)));

        let err = service
            .add_material(&learner, session.id, upload(None, "a.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::Unauthorized(_)));

        let err = service
            .add_material(&caller(&owner), 9999, upload(None, "a.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::NotFound(_)));

        let material = service
            .add_material(&caller(&owner), session.id, upload(None, "lecture-1.pdf"))
            .await
            .unwrap();
        assert_eq!(material.title, "lecture-1.pdf");
        assert_eq!(material.session_id, session.id);
    }

    #[tokio::test]
    async fn test_materials_visible_to_owner_and_enrolled() {
        let ctx = setup_test_context().await;
        let owner = seed_account(&ctx, "owner", Role::Instructor).await;
        let other = seed_account(&ctx, "other", Role::Instructor).await;
        let enrolled = caller(&seed_account(&ctx, "in", Role::Learner).await);
        let outsider = caller(&seed_account(&ctx, "out", Role::Learner).await);
        let session = seed_session(&ctx, &owner, "Optics").await;
        ctx.enrollments().enroll(&enrolled, session.id).await.unwrap();
        let service = ctx.materials();

        let material = service
            .add_material(&caller(&owner), session.id, upload(Some("Week 1"), "w1.pdf"))
            .await
            .unwrap();

        for viewer in [caller(&owner), enrolled] {
            let listed = service.list_materials(&viewer, session.id).await.unwrap();
            assert_eq!(listed.len(), 1);
            assert_eq!(listed[0].title, "Week 1");

            let (name, bytes) = service
                .download_material(&viewer, material.id)
                .await
                .unwrap();
            assert_eq!(name, "w1.pdf");
            assert_eq!(bytes, b"slides");
        }

        let err = service
            .list_materials(&outsider, session.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::Forbidden(_)));
        let err = service
            .download_material(&outsider, material.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::Forbidden(_)));

        // 非属主教师看不到该场次
        let err = service
            .list_materials(&caller(&other), session.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::NotFound(_)));
    }
}
