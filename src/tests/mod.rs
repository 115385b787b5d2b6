mod api_pages_stress;
mod unit_config;
mod unit_page_path_validation;
