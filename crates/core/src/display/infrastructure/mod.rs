pub mod cvt_color_converter;
pub mod highgui_window;
