//! Test fixtures for score sheet parser testing
//!
//! Provides sample score sheets shared by the parser test modules.


/// Header line of a complete score sheet
pub const FULL_HEADER: &str = "STT,SBD,HỌ VÀ TÊN,TIẾNG VIỆT,TIẾNG ANH,TOÁN HỌC,LOGIC-PTSL,HÓA HỌC,VẬT LÝ,SINH HỌC,ĐỊA LÝ,LỊCH SỬ,KTPL";

/// Helper to create a complete score sheet with three students
pub fn create_test_sheet() -> String {
    format!(
        "{FULL_HEADER}\n\
         1, 00123 ,\"Nguyễn Văn A, B\",250,N/V,280,100,25,20,,15,10,8\n\
         2,00124,Trần Thị C,\"7,5\",vắng,200,90,\"12,5\",Vắng,20,,,\n\
         \n\
         3,00125,Lê Văn D,210,220,230,110,20,21,22,23,24,25\n"
    )
}

/// Helper to create a score sheet with malformed rows in between valid ones
pub fn create_sheet_with_malformed_rows() -> String {
    "SBD,HỌ VÀ TÊN,TOÁN HỌC\n\
     00001,An,250\n\
     00002,Bình,250,extra\n\
     00003,Chi\n\
     00004,\"Dũng, E\",100\n"
        .to_string()
}
