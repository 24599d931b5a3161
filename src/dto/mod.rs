pub mod workbook_dto;
