pub mod d400_report_catalog;
