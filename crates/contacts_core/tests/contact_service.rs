use contacts_core::{
    Contact, ContactField, ContactRepository, ContactService, ContactValidationError,
    FileContactRepository, RepoError, RepoResult, StoreConfig,
};
use std::cell::RefCell;
use tempfile::TempDir;

#[derive(Default)]
struct MemoryRepository {
    contacts: RefCell<Vec<Contact>>,
}

impl ContactRepository for MemoryRepository {
    fn load_all(&self) -> RepoResult<Vec<Contact>> {
        Ok(self.contacts.borrow().clone())
    }

    fn append(&self, contact: &Contact) -> RepoResult<()> {
        contact.validate()?;
        self.contacts.borrow_mut().push(contact.clone());
        Ok(())
    }
}

#[test]
fn create_contact_normalizes_whitespace_before_storing() {
    let service = ContactService::new(MemoryRepository::default());

    let created = service
        .create_contact("  Ana   Maria ", "email\t", " ana@x.com\n")
        .unwrap();
    assert_eq!(created, Contact::new("Ana Maria", "email", "ana@x.com"));
    assert_eq!(service.list_contacts().unwrap(), vec![created]);
}

#[test]
fn create_contact_surfaces_validation_errors() {
    let service = ContactService::new(MemoryRepository::default());

    let err = service.create_contact("Ana", "   ", "ana@x.com").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ContactValidationError::EmptyField(ContactField::ContactForm))
    ));
    assert!(service.repository().contacts.borrow().is_empty());
}

#[test]
fn service_over_file_repository_lists_in_creation_order() {
    let dir = TempDir::new().unwrap();
    let repo = FileContactRepository::new(&StoreConfig::new(dir.path().join("contacs.txt")));
    let service = ContactService::new(repo);

    service.create_contact("Ana", "email", "ana@x.com").unwrap();
    service.create_contact("Leo", "phone", "555-1111").unwrap();

    assert_eq!(
        service.list_contacts().unwrap(),
        vec![
            Contact::new("Ana", "email", "ana@x.com"),
            Contact::new("Leo", "phone", "555-1111"),
        ]
    );
}
