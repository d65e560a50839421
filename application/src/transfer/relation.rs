use uuid::Uuid;

pub struct ResolveAuthorsDto {
    pub book_id: Uuid,
}

pub struct ResolveBooksDto {
    pub author_id: Uuid,
}

/// An entity together with the other side of its relationship, when that side
/// was asked for.
#[derive(Debug, Clone)]
pub struct Expanded<E, R> {
    entity: E,
    related: Option<Vec<R>>,
}

impl<E, R> Expanded<E, R> {
    pub fn new(entity: E) -> Self {
        Self {
            entity,
            related: None,
        }
    }

    pub fn entity(&self) -> &E {
        &self.entity
    }

    pub fn related(&self) -> Option<&[R]> {
        self.related.as_deref()
    }

    pub fn attach(&mut self, related: Vec<R>) {
        self.related = Some(related);
    }

    pub fn into_parts(self) -> (E, Option<Vec<R>>) {
        (self.entity, self.related)
    }
}
