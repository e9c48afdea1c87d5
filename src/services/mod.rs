//! 业务逻辑层
//!
//! 每个服务的操作都显式接收调用者身份 [`Caller`]，先经过 [`authz::authorize`]
//! 再访问存储。服务不依赖 HTTP，返回类型化结果或 [`ClassroomError`]。
//!
//! [`Caller`]: crate::authz::Caller
//! [`authz::authorize`]: crate::authz::authorize
//! [`ClassroomError`]: crate::errors::ClassroomError

pub mod accounts;
pub mod assignments;
pub mod attendance;
pub mod enrollments;
pub mod materials;
pub mod sessions;

pub use accounts::AccountService;
pub use assignments::AssignmentService;
pub use attendance::AttendanceService;
pub use enrollments::EnrollmentService;
pub use materials::MaterialService;
pub use sessions::SessionService;

use std::sync::Arc;

use crate::blobs::BlobStore;
use crate::storage::Storage;
use crate::utils::{Clock, CredentialVerifier};

/// 服务共享的能力集合
#[derive(Clone)]
pub struct ServiceContext {
    storage: Arc<dyn Storage>,
    blobs: Arc<dyn BlobStore>,
    verifier: Arc<dyn CredentialVerifier>,
    clock: Arc<dyn Clock>,
}

impl ServiceContext {
    pub fn new(
        storage: Arc<dyn Storage>,
        blobs: Arc<dyn BlobStore>,
        verifier: Arc<dyn CredentialVerifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            storage,
            blobs,
            verifier,
            clock,
        }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub(crate) fn blobs(&self) -> &Arc<dyn BlobStore> {
        &self.blobs
    }

    pub(crate) fn verifier(&self) -> &Arc<dyn CredentialVerifier> {
        &self.verifier
    }

    pub(crate) fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn accounts(&self) -> AccountService {
        AccountService::new(self.clone())
    }

    pub fn sessions(&self) -> SessionService {
        SessionService::new(self.clone())
    }

    pub fn enrollments(&self) -> EnrollmentService {
        EnrollmentService::new(self.clone())
    }

    pub fn assignments(&self) -> AssignmentService {
        AssignmentService::new(self.clone())
    }

    pub fn materials(&self) -> MaterialService {
        MaterialService::new(self.clone())
    }

    pub fn attendance(&self) -> AttendanceService {
        AttendanceService::new(self.clone())
    }
}
