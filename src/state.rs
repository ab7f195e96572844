use itemshelf_backend::ItemStore;

pub struct AppState {
    pub store: ItemStore,
}
