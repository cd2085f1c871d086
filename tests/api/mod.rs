mod books_tests;
mod export_import_tests;
mod health_tests;
