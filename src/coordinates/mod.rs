pub mod reference_frame;
