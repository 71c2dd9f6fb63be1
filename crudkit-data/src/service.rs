use crate::entity::Entity;
use crate::repository::Repository;
use crudkit_core::error::CrudError;
use crudkit_core::id::EntityId;
use std::marker::PhantomData;

/// Thin pass-through over a [`Repository`].
///
/// Exists to decouple the HTTP controller from the storage backend for
/// substitutability in tests; it adds no behavior and no failure modes
/// of its own.
pub struct CrudService<T, R> {
    repo: R,
    _marker: PhantomData<T>,
}

impl<T, R> CrudService<T, R>
where
    T: Entity,
    R: Repository<T>,
{
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            _marker: PhantomData,
        }
    }

    pub async fn create(&self, model: T) -> Result<T, CrudError> {
        self.repo.create(model).await
    }

    pub async fn get_all(&self) -> Result<Vec<T>, CrudError> {
        self.repo.get_all().await
    }

    pub async fn get(&self, id: &EntityId, preload: Option<&str>) -> Result<T, CrudError> {
        self.repo.get(id, preload).await
    }

    pub async fn get_unscoped(&self, id: &EntityId) -> Result<T, CrudError> {
        self.repo.get_unscoped(id).await
    }

    pub async fn update(&self, id: &EntityId, amended: T) -> Result<(), CrudError> {
        self.repo.update(id, amended).await
    }

    pub async fn delete(&self, id: &EntityId, permanently: bool) -> Result<(), CrudError> {
        self.repo.delete(id, permanently).await
    }
}

impl<T, R: Clone> Clone for CrudService<T, R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            _marker: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::SqlValue;
    use crudkit_core::id::IdKind;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Note {
        id: u32,
        body: String,
    }

    impl Entity for Note {
        const ID_KIND: IdKind = IdKind::Uint;

        fn table() -> &'static str {
            "notes"
        }

        fn columns() -> &'static [&'static str] {
            &["id", "body"]
        }

        fn values(&self) -> Vec<SqlValue> {
            vec![self.id.into(), self.body.as_str().into()]
        }

        fn id(&self) -> EntityId {
            EntityId::Uint(self.id.into())
        }

        fn set_id(&mut self, id: EntityId) {
            if let EntityId::Uint(n) = id {
                self.id = n as u32;
            }
        }
    }

    /// Counts calls and either succeeds with canned data or fails with
    /// NotFound, depending on `fail`.
    struct StubRepo {
        fail: bool,
        calls: Arc<AtomicUsize>,
    }

    impl StubRepo {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn note() -> Note {
            Note {
                id: 1,
                body: "hello".into(),
            }
        }
    }

    impl Repository<Note> for StubRepo {
        async fn create(&self, model: Note) -> Result<Note, CrudError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CrudError::EmptyModel);
            }
            Ok(model)
        }

        async fn get_all(&self) -> Result<Vec<Note>, CrudError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CrudError::NotFound);
            }
            Ok(vec![Self::note()])
        }

        async fn get(&self, _id: &EntityId, _preload: Option<&str>) -> Result<Note, CrudError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CrudError::NotFound);
            }
            Ok(Self::note())
        }

        async fn get_unscoped(&self, _id: &EntityId) -> Result<Note, CrudError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CrudError::NotFound);
            }
            Ok(Self::note())
        }

        async fn update(&self, _id: &EntityId, _amended: Note) -> Result<(), CrudError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CrudError::NotFound);
            }
            Ok(())
        }

        async fn delete(&self, _id: &EntityId, _permanently: bool) -> Result<(), CrudError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CrudError::NotFound);
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn delegates_every_method_once() {
        let repo = StubRepo::new(false);
        let calls = repo.calls.clone();
        let svc = CrudService::new(repo);
        let id = EntityId::Uint(1);

        let created = svc.create(StubRepo::note()).await.unwrap();
        assert_eq!(created, StubRepo::note());
        assert_eq!(svc.get_all().await.unwrap().len(), 1);
        assert_eq!(svc.get(&id, None).await.unwrap(), StubRepo::note());
        assert_eq!(svc.get_unscoped(&id).await.unwrap(), StubRepo::note());
        svc.update(&id, StubRepo::note()).await.unwrap();
        svc.delete(&id, true).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn errors_pass_through_unchanged() {
        let svc = CrudService::new(StubRepo::new(true));
        let id = EntityId::Uint(1);

        assert!(matches!(
            svc.create(StubRepo::note()).await,
            Err(CrudError::EmptyModel)
        ));
        assert!(matches!(svc.get_all().await, Err(CrudError::NotFound)));
        assert!(matches!(svc.get(&id, None).await, Err(CrudError::NotFound)));
        assert!(matches!(
            svc.update(&id, StubRepo::note()).await,
            Err(CrudError::NotFound)
        ));
        assert!(matches!(
            svc.delete(&id, false).await,
            Err(CrudError::NotFound)
        ));
    }
}
