use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{
    AuthorTransformer, CreateAuthorRequest, DeleteAuthorRequest, GetAuthorBooksRequest,
    GetAuthorRequest, GetAuthorsRequest, PageQuery, UpdateAuthorRequest,
};
use crate::response::{AuthorPresenter, AuthorResponse, BookPresenter};
use crate::route::{Body, Id, Params};
use application::service::{
    CreateAuthorService, DeleteAuthorService, GetAuthorService, GetAuthorsService,
    ResolveAuthorBooksService, UpdateAuthorService,
};
use application::transfer::Expanded;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use kernel::interface::query::{DependOnAuthorQuery, DependOnBookQuery};
use kernel::interface::update::DependOnAuthorModifier;

pub trait AuthorRouter {
    fn route_author(self) -> Self;
}

impl<D> AuthorRouter for Router<AppModule<D>>
where
    D: DependOnAuthorQuery + DependOnAuthorModifier + DependOnBookQuery,
{
    fn route_author(self) -> Self {
        self.route(
            "/authors",
            get(
                |State(module): State<AppModule<D>>,
                 WithRejection(Query(req), _): Params<GetAuthorsRequest>,
                 WithRejection(Query(page), _): Params<PageQuery>| async move {
                    Controller::new(AuthorTransformer, AuthorPresenter)
                        .intake((req, page))
                        .handle(|(dto, expand)| async move {
                            match module.database().get_authors(dto).await {
                                Ok(page) if expand => module.database().expand_authors(page).await,
                                other => other.map(|page| page.map(Expanded::new)),
                            }
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule<D>>,
                 WithRejection(Json(req), _): Body<CreateAuthorRequest>| async move {
                    Controller::new(AuthorTransformer, AuthorPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.database().create_author(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| (StatusCode::CREATED, res))
                },
            ),
        )
        .route(
            "/authors/:id",
            get(
                |State(module): State<AppModule<D>>,
                 WithRejection(Path(id), _): Id,
                 WithRejection(Query(req), _): Params<GetAuthorRequest>| async move {
                    Controller::new(AuthorTransformer, AuthorPresenter)
                        .intake((id, req))
                        .handle(|(dto, expand)| async move {
                            match module.database().get_author(dto).await {
                                Ok(Some(author)) if expand => {
                                    module.database().expand_author(author).await.map(Some)
                                }
                                other => other.map(|author| author.map(Expanded::new)),
                            }
                        })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(AuthorResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            )
            .patch(
                |State(module): State<AppModule<D>>,
                 WithRejection(Path(id), _): Id,
                 WithRejection(Json(req), _): Body<UpdateAuthorRequest>| async move {
                    Controller::new(AuthorTransformer, AuthorPresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.database().update_author(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule<D>>,
                 WithRejection(Path(id), _): Id| async move {
                    Controller::new(AuthorTransformer, AuthorPresenter)
                        .intake(DeleteAuthorRequest::new(id))
                        .handle(|dto| async move { module.database().delete_author(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/authors/:id/books",
            get(
                |State(module): State<AppModule<D>>,
                 WithRejection(Path(id), _): Id| async move {
                    Controller::new(AuthorTransformer, BookPresenter)
                        .intake(GetAuthorBooksRequest::new(id))
                        .handle(|dto| async move { module.database().resolve_books(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
