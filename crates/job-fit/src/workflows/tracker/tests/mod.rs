mod common;
mod history;
mod workbook;
