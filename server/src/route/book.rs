use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{
    BookTransformer, CreateBookRequest, DeleteBookRequest, GetBookAuthorsRequest,
    GetBookRequest, GetBooksRequest, PageQuery, SearchBooksRequest, UpdateBookRequest,
};
use crate::response::{AuthorPresenter, BookPresenter, BookResponse};
use crate::route::{Body, Id, Params};
use application::service::{
    CreateBookService, DeleteBookService, GetBookService, GetBooksService,
    ResolveBookAuthorsService, UpdateBookService,
};
use application::transfer::Expanded;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use kernel::interface::query::{DependOnAuthorQuery, DependOnBookQuery};
use kernel::interface::update::DependOnBookModifier;

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl<D> BookRouter for Router<AppModule<D>>
where
    D: DependOnBookQuery + DependOnBookModifier + DependOnAuthorQuery,
{
    fn route_book(self) -> Self {
        self.route(
            "/books",
            get(
                |State(module): State<AppModule<D>>,
                 WithRejection(Query(req), _): Params<GetBooksRequest>,
                 WithRejection(Query(page), _): Params<PageQuery>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake((req, page))
                        .handle(|(dto, expand)| async move {
                            match module.database().get_books(dto).await {
                                Ok(page) if expand => module.database().expand_books(page).await,
                                other => other.map(|page| page.map(Expanded::new)),
                            }
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule<D>>,
                 WithRejection(Json(req), _): Body<CreateBookRequest>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.database().create_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| (StatusCode::CREATED, res))
                },
            ),
        )
        .route(
            "/books/search",
            get(
                |State(module): State<AppModule<D>>,
                 WithRejection(Query(req), _): Params<SearchBooksRequest>,
                 WithRejection(Query(page), _): Params<PageQuery>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake((req, page))
                        .handle(|(dto, expand)| async move {
                            match module.database().get_books(dto).await {
                                Ok(page) if expand => module.database().expand_books(page).await,
                                other => other.map(|page| page.map(Expanded::new)),
                            }
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/:id",
            get(
                |State(module): State<AppModule<D>>,
                 WithRejection(Path(id), _): Id,
                 WithRejection(Query(req), _): Params<GetBookRequest>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake((id, req))
                        .handle(|(dto, expand)| async move {
                            match module.database().get_book(dto).await {
                                Ok(Some(book)) if expand => {
                                    module.database().expand_book(book).await.map(Some)
                                }
                                other => other.map(|book| book.map(Expanded::new)),
                            }
                        })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(BookResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            )
            .patch(
                |State(module): State<AppModule<D>>,
                 WithRejection(Path(id), _): Id,
                 WithRejection(Json(req), _): Body<UpdateBookRequest>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.database().update_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule<D>>,
                 WithRejection(Path(id), _): Id| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(DeleteBookRequest::new(id))
                        .handle(|dto| async move { module.database().delete_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/:id/authors",
            get(
                |State(module): State<AppModule<D>>,
                 WithRejection(Path(id), _): Id| async move {
                    Controller::new(BookTransformer, AuthorPresenter)
                        .intake(GetBookAuthorsRequest::new(id))
                        .handle(|dto| async move { module.database().resolve_authors(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
