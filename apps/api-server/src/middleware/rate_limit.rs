//! Rate limiting middleware.

use actix_web::{
    Error, ResponseError,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::rc::Rc;
use std::sync::Arc;

use journal_core::ports::RateLimiter;

use crate::middleware::error::AppError;

/// Rate limiting middleware factory. Each client address gets its own
/// budget under `prefix`.
pub struct RateLimitMiddleware {
    limiter: Arc<dyn RateLimiter>,
    prefix: &'static str,
}

impl RateLimitMiddleware {
    pub fn new(limiter: Arc<dyn RateLimiter>, prefix: &'static str) -> Self {
        Self { limiter, prefix }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
            prefix: self.prefix,
        }))
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: Rc<S>,
    limiter: Arc<dyn RateLimiter>,
    prefix: &'static str,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let limiter = self.limiter.clone();

        let key = format!(
            "{}:{}",
            self.prefix,
            req.connection_info().realip_remote_addr().unwrap_or("unknown")
        );

        Box::pin(async move {
            match limiter.check(&key).await {
                Ok(decision) if !decision.allowed => {
                    let retry_after_secs = decision.retry_after.as_secs().max(1);
                    tracing::warn!(key = %key, retry_after_secs, "Rate limit exceeded");

                    let response = AppError::TooManyRequests { retry_after_secs }.error_response();
                    let (http_req, _payload) = req.into_parts();
                    Ok(ServiceResponse::new(http_req, response).map_into_right_body())
                }
                result => {
                    // Fail open
                    if let Err(e) = result {
                        tracing::error!(error = %e, "Rate limiter error, failing open");
                    }

                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
            }
        })
    }
}
