// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::categories::CategoryCommandService,
        ports::{time::Clock, util::SlugGenerator},
        queries::categories::CategoryQueryService,
    },
    domain::category::{
        CategoryReadRepository, CategoryWriteRepository, services::CategorySlugService,
    },
};

pub struct ApplicationServices {
    pub category_commands: Arc<CategoryCommandService>,
    pub category_queries: Arc<CategoryQueryService>,
}

impl ApplicationServices {
    pub fn new(
        category_write_repo: Arc<dyn CategoryWriteRepository>,
        category_read_repo: Arc<dyn CategoryReadRepository>,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
    ) -> Self {
        let slug_service = Arc::new(CategorySlugService::new(
            Arc::clone(&category_read_repo),
            Arc::clone(&slugger),
        ));

        let category_commands = Arc::new(CategoryCommandService::new(
            Arc::clone(&category_write_repo),
            Arc::clone(&category_read_repo),
            Arc::clone(&slug_service),
            Arc::clone(&clock),
        ));

        let category_queries = Arc::new(CategoryQueryService::new(Arc::clone(
            &category_read_repo,
        )));

        Self {
            category_commands,
            category_queries,
        }
    }
}
