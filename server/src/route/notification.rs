use application::service::{GetNotificationService, ReadNotificationService};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::Router;
use uuid::Uuid;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{GetNotificationsRequest, MarkReadRequest, NotificationTransformer};
use crate::response::NotificationPresenter;

pub trait NotificationRouter {
    fn route_notification(self) -> Self;
}

impl NotificationRouter for Router<AppModule> {
    fn route_notification(self) -> Self {
        self.route(
            "/notifications",
            get(
                |State(module): State<AppModule>, Query(req): Query<GetNotificationsRequest>| async move {
                    Controller::new(NotificationTransformer, NotificationPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.get_notifications(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/notifications/read",
            post(|State(module): State<AppModule>| async move {
                Controller::new((), NotificationPresenter)
                    .bypass(|| module.mark_all_notifications_read())
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/notifications/:id/read",
            post(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(NotificationTransformer, NotificationPresenter)
                        .intake(MarkReadRequest::new(id))
                        .handle(|dto| async move { module.mark_notification_read(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
