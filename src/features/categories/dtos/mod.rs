mod category_dto;

pub use category_dto::{
    AdminListCategoriesQuery, CategoryResponseDto, CreateCategoryDto, ListCategoriesQuery,
    SelectionQuery, SelectionResponseDto, UpdateCategoryDto,
};
