
mod settings_tests;
mod text_slice_tests;
