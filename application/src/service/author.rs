use error_stack::Report;
use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{AuthorQuery, DependOnAuthorQuery};
use kernel::interface::update::{AuthorModifier, DependOnAuthorModifier};
use kernel::prelude::entity::{
    Author, AuthorBiography, AuthorDraft, AuthorId, AuthorName, AuthorSortKey, Page,
};
use kernel::KernelError;
use uuid::Uuid;

use crate::transfer::{
    CreateAuthorDto, DeleteAuthorDto, GetAuthorDto, GetAuthorsDto, Patch, UpdateAuthorDto,
};

#[async_trait::async_trait]
pub trait GetAuthorService: 'static + Sync + Send + DependOnAuthorQuery {
    async fn get_author(&self, dto: GetAuthorDto) -> error_stack::Result<Option<Author>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = AuthorId::new(dto.id);
        self.author_query().find_by_id(&mut connection, &id).await
    }
}

impl<T> GetAuthorService for T where T: DependOnAuthorQuery {}

#[async_trait::async_trait]
pub trait GetAuthorsService: 'static + Sync + Send + DependOnAuthorQuery {
    async fn get_authors(&self, dto: GetAuthorsDto) -> error_stack::Result<Page<Author>, KernelError> {
        let page = dto.page.into_request::<AuthorSortKey>()?;
        let name = dto.name.as_deref().filter(|name| !name.trim().is_empty());
        let mut connection = self.database_connection().transact().await?;
        self.author_query()
            .find_page(&mut connection, name, &page)
            .await
    }
}

impl<T> GetAuthorsService for T where T: DependOnAuthorQuery {}

#[async_trait::async_trait]
pub trait CreateAuthorService: 'static + Sync + Send + DependOnAuthorModifier {
    async fn create_author(&self, dto: CreateAuthorDto) -> error_stack::Result<Author, KernelError> {
        let draft = AuthorDraft::new(
            AuthorName::parse(dto.name)?,
            dto.biography.map(AuthorBiography::new),
        );
        let mut connection = self.database_connection().transact().await?;
        let author = self.author_modifier().create(&mut connection, draft).await?;
        connection.commit().await?;
        tracing::info!(id = %Uuid::from(author.id().clone()), "created author");
        Ok(author)
    }
}

impl<T> CreateAuthorService for T where T: DependOnAuthorModifier {}

#[async_trait::async_trait]
pub trait UpdateAuthorService:
    'static + Sync + Send + DependOnAuthorQuery + DependOnAuthorModifier
{
    async fn update_author(&self, dto: UpdateAuthorDto) -> error_stack::Result<Author, KernelError> {
        let name = dto.name.map(AuthorName::parse).transpose()?;

        let mut connection = self.database_connection().transact().await?;
        let mut author = self
            .author_query()
            .find_by_id(&mut connection, &AuthorId::new(dto.id))
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("Author not found with id: {}", dto.id))
            })?;
        author.substitute(|author| {
            if let Some(name) = name {
                *author.name = name;
            }
            if let Patch::Set(biography) = dto.biography {
                *author.biography = biography.map(AuthorBiography::new);
            }
        });
        self.author_modifier().update(&mut connection, &author).await?;
        connection.commit().await?;
        tracing::info!(id = %dto.id, "updated author");
        Ok(author)
    }
}

impl<T> UpdateAuthorService for T where T: DependOnAuthorQuery + DependOnAuthorModifier {}

#[async_trait::async_trait]
pub trait DeleteAuthorService: 'static + Sync + Send + DependOnAuthorModifier {
    /// Also detaches the author from every book. Returns whether it existed.
    async fn delete_author(&self, dto: DeleteAuthorDto) -> error_stack::Result<bool, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let existed = self
            .author_modifier()
            .delete(&mut connection, &AuthorId::new(dto.id))
            .await?;
        connection.commit().await?;
        tracing::info!(id = %dto.id, existed, "deleted author");
        Ok(existed)
    }
}

impl<T> DeleteAuthorService for T where T: DependOnAuthorModifier {}

#[cfg(test)]
mod test {
    use driver::database::InMemoryDatabase;
    use kernel::prelude::entity::SortDirection;
    use kernel::KernelError;
    use uuid::Uuid;

    use crate::service::{
        CreateAuthorService, DeleteAuthorService, GetAuthorService, GetAuthorsService,
        UpdateAuthorService,
    };
    use crate::transfer::{
        CreateAuthorDto, DeleteAuthorDto, GetAuthorDto, GetAuthorsDto, PageDto, Patch,
        UpdateAuthorDto,
    };

    fn create(name: &str, biography: Option<&str>) -> CreateAuthorDto {
        CreateAuthorDto {
            name: name.to_string(),
            biography: biography.map(ToString::to_string),
        }
    }

    fn biography_of(author: &kernel::prelude::entity::Author) -> Option<&str> {
        author
            .biography()
            .as_ref()
            .map(|biography| AsRef::<String>::as_ref(biography).as_str())
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let db = InMemoryDatabase::new();
        let error = db.create_author(create(" \t", None)).await.unwrap_err();
        assert_eq!(error.current_context(), &KernelError::Validation);
    }

    #[tokio::test]
    async fn biography_is_kept_unless_supplied() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let author = db
            .create_author(create("Leo Tolstoy", Some("Russian novelist")))
            .await?;
        let id: Uuid = author.id().clone().into();

        let renamed = db
            .update_author(UpdateAuthorDto {
                id,
                name: Some("Lev Tolstoy".to_string()),
                biography: Patch::Unchanged,
            })
            .await?;
        assert_eq!(renamed.name().as_ref(), "Lev Tolstoy");
        assert_eq!(biography_of(&renamed), Some("Russian novelist"));

        let cleared = db
            .update_author(UpdateAuthorDto {
                id,
                name: None,
                biography: Patch::Set(None),
            })
            .await?;
        assert_eq!(biography_of(&cleared), None);

        let stored = db.get_author(GetAuthorDto { id }).await?.unwrap();
        assert_eq!(stored.name().as_ref(), "Lev Tolstoy");
        assert_eq!(biography_of(&stored), None);
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_author_is_not_found() {
        let db = InMemoryDatabase::new();
        let error = db
            .update_author(UpdateAuthorDto {
                id: Uuid::new_v4(),
                name: None,
                biography: Patch::Set(Some("unknown".to_string())),
            })
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::NotFound);
    }

    #[tokio::test]
    async fn name_filter_and_sort() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        db.create_author(create("Leo Tolstoy", None)).await?;
        db.create_author(create("Aleksey Tolstoy", Some("Count"))).await?;
        db.create_author(create("Fyodor Dostoevsky", None)).await?;

        let page = db
            .get_authors(GetAuthorsDto {
                name: Some("tolstoy".to_string()),
                page: PageDto {
                    sort: Some("name".to_string()),
                    direction: Some(SortDirection::Desc),
                    ..PageDto::default()
                },
            })
            .await?;
        let names = page
            .content()
            .iter()
            .map(|author| author.name().as_ref().as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Leo Tolstoy", "Aleksey Tolstoy"]);

        let everyone = db
            .get_authors(GetAuthorsDto {
                name: Some("   ".to_string()),
                page: PageDto::default(),
            })
            .await?;
        assert_eq!(everyone.total_elements(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn missing_biography_sorts_last() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        db.create_author(create("Anonymous", None)).await?;
        db.create_author(create("Anton Chekhov", Some("Physician"))).await?;
        db.create_author(create("Ivan Turgenev", Some("Hunter"))).await?;

        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let page = db
                .get_authors(GetAuthorsDto {
                    name: None,
                    page: PageDto {
                        sort: Some("biography".to_string()),
                        direction: Some(direction),
                        ..PageDto::default()
                    },
                })
                .await?;
            assert_eq!(page.content()[2].name().as_ref(), "Anonymous");
        }
        Ok(())
    }

    #[tokio::test]
    async fn delete_reports_existence() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let author = db.create_author(create("Nikolai Gogol", None)).await?;
        let id: Uuid = author.id().clone().into();

        assert!(db.delete_author(DeleteAuthorDto { id }).await?);
        assert!(!db.delete_author(DeleteAuthorDto { id }).await?);
        assert!(db.get_author(GetAuthorDto { id }).await?.is_none());
        Ok(())
    }
}
