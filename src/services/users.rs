//! Users service.

use crate::client::Dispatcher;
use crate::decode::{Discard, JsonDecoder};
use crate::encoding::RequestSpec;
use crate::error::AdminError;
use crate::types::*;
use std::sync::Arc;

/// Service for user, subuser and capability operations.
pub struct UsersService {
    dispatcher: Arc<Dispatcher>,
}

impl UsersService {
    /// Create a new users service.
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Fetch a user.
    pub async fn info(&self, uid: impl Into<String>) -> Result<UserInfoResponse, AdminError> {
        let request = UserInfoRequest::new(uid);
        self.dispatcher
            .call(RequestSpec::get("user").query(&request), JsonDecoder::new())
            .await
    }

    /// Create a user.
    pub async fn create(&self, request: UserCreateRequest) -> Result<UserInfoResponse, AdminError> {
        self.dispatcher
            .call(RequestSpec::put("user").query(&request), JsonDecoder::new())
            .await
    }

    /// Modify a user. Only non-empty fields are sent.
    pub async fn modify(&self, request: UserModifyRequest) -> Result<UserInfoResponse, AdminError> {
        self.dispatcher
            .call(RequestSpec::post("user").query(&request), JsonDecoder::new())
            .await
    }

    /// Remove a user, optionally with all of their data.
    pub async fn remove(&self, uid: impl Into<String>, purge_data: bool) -> Result<(), AdminError> {
        let request = UserRemoveRequest {
            uid: uid.into(),
            purge_data,
        };
        self.dispatcher
            .call(RequestSpec::delete("user").query(&request), Discard)
            .await
    }

    /// Create a subuser. Returns all of the parent's subusers.
    pub async fn create_subuser(&self, request: SubUserRequest) -> Result<Vec<SubUser>, AdminError> {
        self.dispatcher
            .call(RequestSpec::put("user?subuser").query(&request), JsonDecoder::new())
            .await
    }

    /// Modify a subuser. Returns all of the parent's subusers.
    pub async fn modify_subuser(&self, request: SubUserRequest) -> Result<Vec<SubUser>, AdminError> {
        self.dispatcher
            .call(RequestSpec::post("user?subuser").query(&request), JsonDecoder::new())
            .await
    }

    /// Remove a subuser.
    pub async fn remove_subuser(&self, request: SubUserRemoveRequest) -> Result<(), AdminError> {
        self.dispatcher
            .call(RequestSpec::delete("user?subuser").query(&request), Discard)
            .await
    }

    /// Grant capabilities. The gateway merges them with existing ones and
    /// returns the resulting set.
    pub async fn add_caps(&self, request: UserCapsRequest) -> Result<Vec<UserCap>, AdminError> {
        self.dispatcher
            .call(RequestSpec::put("user?caps").query(&request), JsonDecoder::new())
            .await
    }

    /// Revoke capabilities and return what remains.
    pub async fn remove_caps(&self, request: UserCapsRequest) -> Result<Vec<UserCap>, AdminError> {
        self.dispatcher
            .call(RequestSpec::delete("user?caps").query(&request), JsonDecoder::new())
            .await
    }
}
