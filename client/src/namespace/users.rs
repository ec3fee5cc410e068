use customgpt_core::api::{GetUser, GetUserOutcome, UpdateUser, UpdateUserOutcome};
use customgpt_core::{ApiError, Endpoint, Response};

use crate::error::Error;
use crate::kwargs::Kwargs;

const UPDATE_FIELDS: &[&str] = &["profile_photo", "name"];

namespace! {
    /// `session.users()`
    Users
}

impl Users<'_> {
    /// The account the API key belongs to.
    pub fn get(&self) -> Result<Response<GetUserOutcome>, Error> {
        self.target.call(&GetUser)
    }

    pub async fn get_async(&self) -> Result<Response<GetUserOutcome>, Error> {
        self.target.call_async(&GetUser).await
    }

    pub fn update(&self, kwargs: Kwargs) -> Result<Response<UpdateUserOutcome>, Error> {
        self.target.call(&update_request(kwargs)?)
    }

    pub async fn update_async(&self, kwargs: Kwargs) -> Result<Response<UpdateUserOutcome>, Error> {
        self.target.call_async(&update_request(kwargs)?).await
    }
}

fn update_request(mut kwargs: Kwargs) -> Result<UpdateUser, ApiError> {
    let body = kwargs.pluck_form(UpdateUser::NAME, UPDATE_FIELDS)?;
    kwargs.finish(UpdateUser::NAME)?;
    Ok(UpdateUser { body })
}
