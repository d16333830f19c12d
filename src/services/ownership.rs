use crate::db::models::{Course, ExamWithCourse};
use crate::services::errors::{Entity, ServiceError};

/// A resource whose access is scoped to a single user.
pub(crate) trait Owned {
    fn owner_id(&self) -> i64;
}

impl Owned for Course {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

impl Owned for ExamWithCourse {
    fn owner_id(&self) -> i64 {
        self.owner_id
    }
}

pub(crate) fn owns<R: Owned>(resource: &R, user_id: i64) -> bool {
    resource.owner_id() == user_id
}

/// Turns a lookup result into the resource, rejecting absent rows with
/// `NotFound` and rows owned by someone else with `Unauthorized`.
pub(crate) fn ensure_owned<R: Owned>(
    resource: Option<R>,
    entity: Entity,
    id: i64,
    user_id: i64,
) -> Result<R, ServiceError> {
    let Some(resource) = resource else {
        return Err(ServiceError::NotFound { entity, id });
    };

    if !owns(&resource, user_id) {
        tracing::warn!(
            entity = entity.as_str(),
            id,
            user_id,
            "Rejected access to resource owned by another user"
        );
        return Err(ServiceError::Unauthorized { entity });
    }

    Ok(resource)
}
