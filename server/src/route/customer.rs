use application::service::{CreateCustomerService, GetCustomerService, UpdateCustomerService};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{
    CreateCustomerRequest, CustomerTransformer, GetCustomerRequest, UpdateContactRequest,
};
use crate::response::{CustomerPresenter, CustomerResponse};

pub trait CustomerRouter {
    fn route_customer(self) -> Self;
}

impl CustomerRouter for Router<AppModule> {
    fn route_customer(self) -> Self {
        self.route(
            "/customers",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), CustomerPresenter)
                    .bypass(|| module.get_all_customers())
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule>, Json(req): Json<CreateCustomerRequest>| async move {
                    Controller::new(CustomerTransformer, CustomerPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.create_customer(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| (StatusCode::CREATED, res))
                },
            ),
        )
        .route(
            "/customers/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(CustomerTransformer, CustomerPresenter)
                        .intake(GetCustomerRequest::new(id))
                        .handle(|dto| async move { module.get_customer(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(CustomerResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            )
            .patch(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<UpdateContactRequest>| async move {
                    Controller::new(CustomerTransformer, CustomerPresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.update_customer_contact(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
